use billed_app::{NewBillPage, SelectedFile};
use billed_core::constants::{
    FIELD_AMOUNT, FIELD_COMMENTARY, FIELD_DATEPICKER, FIELD_EXPENSE_NAME, FIELD_EXPENSE_TYPE,
    FIELD_PCT, FIELD_VAT,
};

/// PNG signature followed by the start of an IHDR chunk
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ]
}

/// JFIF header
pub fn jpeg_bytes() -> Vec<u8> {
    vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
    ]
}

pub fn png_receipt(name: &str) -> SelectedFile {
    SelectedFile::from_bytes(name, "image/png", png_bytes())
}

pub fn jpeg_receipt(name: &str) -> SelectedFile {
    SelectedFile::from_bytes(name, "image/jpeg", jpeg_bytes())
}

pub fn pdf_file() -> SelectedFile {
    SelectedFile::from_bytes("file.pdf", "file/pdf", b"file.pdf".to_vec())
}

/// Fill the form with the "Vol Paris Londres" expense
pub fn fill_flight_form(page: &NewBillPage) {
    page.set_field(FIELD_EXPENSE_TYPE, "Transports");
    page.set_field(FIELD_EXPENSE_NAME, "Vol Paris Londres");
    page.set_field(FIELD_DATEPICKER, "2024-08-08");
    page.set_field(FIELD_AMOUNT, "300");
    page.set_field(FIELD_VAT, "50");
    page.set_field(FIELD_PCT, "5");
    page.set_field(FIELD_COMMENTARY, "");
}
