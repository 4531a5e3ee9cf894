//! Translation boundary: the backend contract and the tier profile table.

mod backend;
mod profile;

pub use backend::{FragmentStream, TranslationBackend, TranslationRequest};
pub use profile::{
    DEEP_EDITORIAL_MODEL, FAST_MODEL, ModelProfile, ProfileOverride, TierOverrides, TierProfiles,
};
