use billed_app::BillRow;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One table line for a bill row: type, name, date, amount, status.
pub fn format_row(row: &BillRow) -> String {
    let amount = row
        .amount
        .map(|a| format!("{} €", a))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<20} {:<24} {:<10} {:>8}  {}",
        truncate_string(&row.expense_type, 20),
        truncate_string(&row.name, 24),
        row.date,
        amount,
        row.status
    )
}

/// Initialize tracing for the CLI.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("billed=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
