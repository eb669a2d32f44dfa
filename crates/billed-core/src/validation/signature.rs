use std::fmt::{Display, Formatter, Result as FmtResult};

const SIGNATURE_LEN: usize = 4;
const PNG_SIGNATURE: &str = "89504e47";
const JPEG_SIGNATURE: &str = "ffd8ff";

/// Image format detected from a file signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Unknown,
}

impl ImageFormat {
    /// MIME type matching the detected format, if any
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            ImageFormat::Png => Some("image/png"),
            ImageFormat::Jpeg => Some("image/jpeg"),
            ImageFormat::Unknown => None,
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Jpeg => write!(f, "jpeg"),
            ImageFormat::Unknown => write!(f, "unknown"),
        }
    }
}

/// Lowercase hex rendering of the first four bytes (fewer for short input).
pub fn file_signature(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(SIGNATURE_LEN)
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Classify `bytes` by magic number.
pub fn detect_image_format(bytes: &[u8]) -> ImageFormat {
    let signature = file_signature(bytes);
    let format = if signature.starts_with(PNG_SIGNATURE) {
        ImageFormat::Png
    } else if signature.starts_with(JPEG_SIGNATURE) {
        ImageFormat::Jpeg
    } else {
        ImageFormat::Unknown
    };

    tracing::debug!(signature = %signature, format = %format, "Sniffed file signature");
    format
}
