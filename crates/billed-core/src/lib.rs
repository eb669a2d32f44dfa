//! Billed Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! receipt validation routines shared by the Billed store backends, the
//! front controllers and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, StoreBackend};
pub use error::{AppError, ErrorMetadata};
pub use models::{Bill, BillDraft, BillStatus, StoredFile, User};
pub use validation::{detect_image_format, validate_receipt, ImageFormat, ValidationOutcome};
