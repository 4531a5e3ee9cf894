//! Session domain module.
//!
//! - `model`: status, format and tier selectors, request tickets
//! - `state`: the `SessionState` owner and its state machine

mod model;
mod state;

pub use model::{ModelTier, RequestOutcome, RequestTicket, TranslationFormat, TranslationStatus};
pub use state::SessionState;
