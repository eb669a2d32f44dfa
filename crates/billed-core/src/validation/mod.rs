//! Receipt validation
//!
//! Receipts are accepted only when their leading bytes carry a PNG or JPEG
//! signature that agrees with the MIME type declared by the client.

mod receipt;
mod signature;

pub use receipt::{
    check_receipt_size, display_file_name, normalize_mime_type, validate_receipt,
    RejectionReason, ValidationOutcome,
};
pub use signature::{detect_image_format, file_signature, ImageFormat};
