//! Shared constants: DOM field identifiers, fixed UI strings and defaults.

/// `data-testid` of the new bill form fields.
pub const FIELD_EXPENSE_TYPE: &str = "expense-type";
pub const FIELD_EXPENSE_NAME: &str = "expense-name";
pub const FIELD_DATEPICKER: &str = "datepicker";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_VAT: &str = "vat";
pub const FIELD_PCT: &str = "pct";
pub const FIELD_COMMENTARY: &str = "commentary";

/// CSS class applied to the file input when the receipt signature matches.
pub const CLASS_ACCEPTED: &str = "blue-border";
/// CSS class applied to the file input when the receipt is rejected.
pub const CLASS_REJECTED: &str = "red-border";

pub const INVALID_RECEIPT_MESSAGE: &str = "You can only upload jpeg, jpg or png files";

/// VAT percentage used when the form value cannot be parsed.
pub const DEFAULT_PCT: i64 = 20;

/// Session storage key holding the connected user as JSON.
pub const SESSION_USER_KEY: &str = "user";
/// Session storage key holding the API bearer token.
pub const SESSION_JWT_KEY: &str = "jwt";

/// Multipart field names sent with the receipt upload.
pub const MULTIPART_FILE_FIELD: &str = "file";
pub const MULTIPART_EMAIL_FIELD: &str = "email";

/// Expense categories offered by the new bill form.
pub const EXPENSE_TYPES: &[&str] = &[
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// Preview image width as a fraction of the modal width.
pub const PROOF_IMAGE_WIDTH_RATIO: f64 = 0.5;
