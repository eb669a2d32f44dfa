//! Store abstraction trait
//!
//! This module defines the `BillStore` trait that every store backend
//! implements, along with the request payloads it accepts.

use crate::StoreBackend;
use async_trait::async_trait;
use billed_core::{AppError, Bill, StoredFile};
use bytes::Bytes;
use thiserror::Error;

/// Store operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Non-success response; displays as `Erreur {status}`
    #[error("Erreur {status}")]
    Http { status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    pub fn not_found() -> Self {
        StoreError::Http { status: 404 }
    }

    pub fn server() -> Self {
        StoreError::Http { status: 500 }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// One part of a multipart payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        data: Bytes,
    },
}

/// Ordered multipart form, the equivalent of a browser `FormData`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, FormPart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, name: &str, value: impl Into<String>) {
        self.parts
            .push((name.to_string(), FormPart::Text(value.into())));
    }

    pub fn append_file(
        &mut self,
        name: &str,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) {
        self.parts.push((
            name.to_string(),
            FormPart::File {
                file_name: file_name.into(),
                content_type: content_type.into(),
                data,
            },
        ));
    }

    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts
            .iter()
            .find(|(part_name, _)| part_name == name)
            .map(|(_, part)| part)
    }

    /// Value of a text part
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FormPart::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn parts(&self) -> &[(String, FormPart)] {
        &self.parts
    }
}

/// Headers hint sent with a create call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    /// Let the transport pick the multipart content type and boundary
    pub no_content_type: bool,
}

/// Receipt upload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub data: MultipartForm,
    pub headers: RequestHeaders,
}

/// Bill update request
///
/// `data` is the JSON-serialized bill; `selector` is the key returned by the
/// receipt upload, absent when no upload has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub data: String,
    pub selector: Option<String>,
}

impl UpdateRequest {
    pub fn new(bill: &Bill, selector: Option<String>) -> StoreResult<Self> {
        Ok(UpdateRequest {
            data: serde_json::to_string(bill)?,
            selector,
        })
    }

    /// Decode the bill carried by this request
    pub fn bill(&self) -> StoreResult<Bill> {
        Ok(serde_json::from_str(&self.data)?)
    }
}

/// Bill store abstraction
///
/// Every backend (in-memory mock, REST API) implements this trait so the
/// controllers never depend on transport details.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Upload a receipt and return its public URL and key
    async fn create(&self, request: CreateRequest) -> StoreResult<StoredFile>;

    /// Save a bill under the key returned by `create`
    async fn update(&self, request: UpdateRequest) -> StoreResult<Bill>;

    /// List bills of the connected user, in store order
    async fn list(&self) -> StoreResult<Vec<Bill>>;

    /// Get the store backend type
    fn backend_type(&self) -> StoreBackend;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_render_french_status_text() {
        assert_eq!(StoreError::not_found().to_string(), "Erreur 404");
        assert_eq!(StoreError::server().to_string(), "Erreur 500");
        assert_eq!(StoreError::Http { status: 403 }.to_string(), "Erreur 403");
    }

    #[test]
    fn store_error_converts_to_app_error_with_same_text() {
        let err: AppError = StoreError::server().into();
        assert_eq!(err.to_string(), "Store error: Erreur 500");
    }

    #[test]
    fn multipart_form_keeps_parts_in_order() {
        let mut form = MultipartForm::new();
        form.append_file("file", "receipt.png", "image/png", Bytes::from_static(b"\x89PNG"));
        form.append_text("email", "a@a");

        assert_eq!(form.parts().len(), 2);
        assert_eq!(form.parts()[0].0, "file");
        assert_eq!(form.text("email"), Some("a@a"));
        assert_eq!(form.text("file"), None);
        assert!(form.get("missing").is_none());
    }
}
