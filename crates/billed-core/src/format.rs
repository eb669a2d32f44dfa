//! Display formatting for the bill list.

use chrono::{Datelike, NaiveDate};

use crate::models::BillStatus;

/// First three letters of the French short month names, capitalized.
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Format an ISO date (`2004-04-04`) the way the bill list shows it (`4 Avr. 04`).
pub fn format_date(date: &str) -> Result<String, chrono::ParseError> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")?;
    let month = MONTHS[parsed.month0() as usize];
    let year = format!("{:04}", parsed.year());
    Ok(format!("{} {}. {}", parsed.day(), month, &year[2..]))
}

/// French label shown for a bill status
pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refused",
    }
}
