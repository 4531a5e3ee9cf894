//! Infrastructure layer for editrans.
//!
//! This crate provides the file-backed implementations of the core
//! persistence traits, path resolution, and configuration loading.

pub mod config_service;
pub mod file_state_repository;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use file_state_repository::FileStateRepository;
pub use paths::{EditransPaths, PathError};
