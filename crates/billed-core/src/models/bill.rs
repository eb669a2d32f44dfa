use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PCT;

/// Review status of a bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

/// Expense report record
///
/// `amount` is `None` when the form value was not a number; it serializes as
/// `null`, the same way the web client sends `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: Option<i64>,
    pub date: String,
    #[serde(default)]
    pub vat: String,
    pub pct: i64,
    #[serde(default)]
    pub commentary: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

/// Result of a receipt upload: public URL and the identifier later used as
/// the update selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub file_url: String,
    pub key: String,
}

/// Raw form values captured at submit time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillDraft {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl BillDraft {
    /// Coerce the form values into a pending bill.
    ///
    /// No validation happens here: a non-numeric amount is carried as `None`
    /// and an unparsable (or zero) pct falls back to 20.
    pub fn into_bill(
        self,
        email: impl Into<String>,
        file_url: Option<String>,
        file_name: Option<String>,
    ) -> Bill {
        Bill {
            id: None,
            email: email.into(),
            expense_type: self.expense_type,
            name: self.name,
            amount: parse_int(&self.amount),
            date: self.date,
            vat: self.vat,
            pct: parse_int(&self.pct)
                .filter(|pct| *pct != 0)
                .unwrap_or(DEFAULT_PCT),
            commentary: self.commentary,
            file_url,
            file_name,
            status: BillStatus::Pending,
            comment_admin: None,
        }
    }
}

/// Parse the leading base-10 integer of `value`.
///
/// Leading whitespace and a sign are accepted and trailing garbage is ignored
/// (`"12.5"` is 12, `"300€"` is 300). Returns `None` when no digit leads.
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as i64));
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BillDraft {
        BillDraft {
            expense_type: "Transports".to_string(),
            name: "Vol Paris Londres".to_string(),
            amount: "300".to_string(),
            date: "2024-08-08".to_string(),
            vat: "50".to_string(),
            pct: "5".to_string(),
            commentary: String::new(),
        }
    }

    #[test]
    fn parse_int_follows_leading_digits() {
        assert_eq!(parse_int("300"), Some(300));
        assert_eq!(parse_int("  42"), Some(42));
        assert_eq!(parse_int("12.5"), Some(12));
        assert_eq!(parse_int("300€"), Some(300));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn into_bill_builds_pending_record() {
        let bill = draft().into_bill(
            "a@a",
            Some("https://localhost:3456/images/test.jpg".to_string()),
            Some("receipt.png".to_string()),
        );
        assert_eq!(bill.email, "a@a");
        assert_eq!(bill.amount, Some(300));
        assert_eq!(bill.pct, 5);
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.file_name.as_deref(), Some("receipt.png"));
    }

    #[test]
    fn pct_defaults_to_twenty() {
        for raw in ["", "abc", "0"] {
            let bill = BillDraft {
                pct: raw.to_string(),
                ..draft()
            }
            .into_bill("a@a", None, None);
            assert_eq!(bill.pct, 20, "pct {:?}", raw);
        }
    }

    #[test]
    fn non_numeric_amount_serializes_as_null() {
        let bill = BillDraft {
            amount: "abc".to_string(),
            ..draft()
        }
        .into_bill("a@a", None, None);
        assert_eq!(bill.amount, None);

        let json = serde_json::to_value(&bill).unwrap();
        assert!(json["amount"].is_null());
        assert_eq!(json["type"], "Transports");
        assert_eq!(json["status"], "pending");
        assert!(json["fileUrl"].is_null());
        assert!(json.get("id").is_none());
    }
}
