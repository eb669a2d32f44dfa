//! Billed Store Library
//!
//! This crate provides the bill store abstraction used by the front
//! controllers and its implementations: an in-memory mock seeded with fixture
//! bills, and an HTTP client for the Billed REST API.
//!
//! # Error messages
//!
//! Store failures render as the HTTP-flavored text the list view shows
//! verbatim (`Erreur 404`, `Erreur 500`).

#[cfg(feature = "store-api")]
pub mod api;
pub mod factory;
pub mod fixtures;
#[cfg(feature = "store-mock")]
pub mod mock;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "store-api")]
pub use api::ApiStore;
pub use billed_core::StoreBackend;
pub use factory::create_store;
#[cfg(feature = "store-mock")]
pub use mock::{MockStore, RecordedCreate};
pub use traits::{
    BillStore, CreateRequest, FormPart, MultipartForm, RequestHeaders, StoreError, StoreResult,
    UpdateRequest,
};
