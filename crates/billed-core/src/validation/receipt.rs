use super::signature::{detect_image_format, ImageFormat};
use crate::constants::INVALID_RECEIPT_MESSAGE;

/// Why a receipt was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The byte signature disagrees with the declared MIME type, or is
    /// neither PNG nor JPEG.
    SignatureMismatch {
        detected: ImageFormat,
        declared: String,
    },
    TooLarge {
        size: usize,
        max: usize,
    },
}

impl RejectionReason {
    /// Text shown next to the file input
    pub fn message(&self) -> String {
        match self {
            RejectionReason::SignatureMismatch { .. } => INVALID_RECEIPT_MESSAGE.to_string(),
            RejectionReason::TooLarge { max, .. } => format!(
                "Receipt exceeds the maximum size of {} MB",
                max / 1024 / 1024
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(ImageFormat),
    Rejected(RejectionReason),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }
}

/// Normalize MIME type by stripping parameters (e.g. "image/png; q=1" -> "image/png").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Check a receipt's bytes against the MIME type the client declared.
///
/// The declared type must equal the sniffed format's MIME type exactly, so a
/// PNG declared as `image/jpeg` is refused just like a PDF.
pub fn validate_receipt(bytes: &[u8], declared_mime_type: &str) -> ValidationOutcome {
    let detected = detect_image_format(bytes);
    let declared = normalize_mime_type(declared_mime_type);

    match detected.mime_type() {
        Some(mime) if mime == declared => ValidationOutcome::Accepted(detected),
        _ => ValidationOutcome::Rejected(RejectionReason::SignatureMismatch {
            detected,
            declared: declared_mime_type.to_string(),
        }),
    }
}

/// Size gate applied before sniffing.
pub fn check_receipt_size(size: usize, max: usize) -> Option<RejectionReason> {
    (size > max).then_some(RejectionReason::TooLarge { size, max })
}

/// File name shown for a selected file, derived from the input's raw value.
///
/// Inputs outside a browser sandbox report a Windows-style path
/// (`C:\fakepath\receipt.png`); only the last segment is kept.
pub fn display_file_name(raw_value: &str) -> String {
    raw_value
        .rsplit('\\')
        .next()
        .unwrap_or(raw_value)
        .to_string()
}
