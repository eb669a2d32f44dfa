//! Billed CLI: drives the bill list and new bill controllers from a terminal.
//!
//! Reads the BILLED_* environment (or a .env file). The store backend is the
//! in-memory mock unless BILLED_STORE_BACKEND=api.

use anyhow::Context;
use billed_app::{
    Bills, BillsPage, FileChangeEvent, MemorySessionStorage, NewBill, NewBillOptions, NewBillPage,
    RecordingNavigator, SelectedFile, Session, SessionStorage,
};
use billed_cli::{format_row, init_tracing};
use billed_core::constants::{
    FIELD_AMOUNT, FIELD_COMMENTARY, FIELD_DATEPICKER, FIELD_EXPENSE_NAME, FIELD_EXPENSE_TYPE,
    FIELD_PCT, FIELD_VAT, EXPENSE_TYPES, SESSION_JWT_KEY,
};
use billed_core::validation::file_signature;
use billed_core::{detect_image_format, Config, User, ValidationOutcome};
use billed_store::create_store;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "billed", about = "Billed expense reports CLI")]
struct Cli {
    /// API bearer token, stored in the session before any store call
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the session user's bills, latest first
    List {
        /// Output format: json or table
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Validate and upload a receipt, then submit a bill for it
    Submit {
        /// Path to the receipt
        #[arg(long)]
        file: PathBuf,
        /// Expense type, e.g. Transports
        #[arg(long = "type")]
        expense_type: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: String,
        /// Expense date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        vat: String,
        /// VAT percentage; blank or 0 means 20
        #[arg(long, default_value = "")]
        pct: String,
        #[arg(long, default_value = "")]
        commentary: String,
        /// Declared MIME type; guessed from the extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },
    /// Print the magic-number signature and detected format of a file
    Sniff {
        /// Path to the file to inspect
        path: PathBuf,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn session_for(config: &Config, token: Option<String>) -> anyhow::Result<Session> {
    let storage = Arc::new(MemorySessionStorage::new());
    if let Some(token) = token {
        storage.set_item(SESSION_JWT_KEY, &token);
    }
    let session = Session::new(storage);
    session
        .set_user(&User::employee(config.user_email.clone()))
        .context("Failed to seed session user")?;
    Ok(session)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(
        environment = %config.environment,
        store_backend = %config.store_backend,
        "Configuration loaded"
    );

    match cli.command {
        Commands::List { format } => {
            let session = session_for(&config, cli.token)?;
            let store = create_store(&config, session.token())?;
            let controller = Bills::new(
                Arc::new(BillsPage::new()),
                Arc::new(RecordingNavigator::new()),
                Some(store),
                config.modal_width,
            );

            let rows = controller.get_bills().await?;
            if format == "json" {
                let json: Vec<_> = rows
                    .iter()
                    .map(|row| {
                        serde_json::json!({
                            "id": row.id,
                            "type": row.expense_type,
                            "name": row.name,
                            "date": row.date,
                            "amount": row.amount,
                            "status": row.status,
                            "fileUrl": row.file_url,
                        })
                    })
                    .collect();
                print_json(&json)?;
            } else {
                println!("{}", BillsPage::TITLE);
                for row in &rows {
                    println!("{}", format_row(row));
                }
            }
        }
        Commands::Submit {
            file,
            expense_type,
            name,
            amount,
            date,
            vat,
            pct,
            commentary,
            mime,
        } => {
            if !EXPENSE_TYPES.contains(&expense_type.as_str()) {
                tracing::warn!(
                    expense_type = %expense_type,
                    known = ?EXPENSE_TYPES,
                    "Expense type is not one of the form's categories"
                );
            }

            let session = session_for(&config, cli.token)?;
            let store = create_store(&config, session.token())?;
            let page = Arc::new(NewBillPage::new());
            let navigator = Arc::new(RecordingNavigator::new());
            let controller = NewBill::new(
                page.clone(),
                navigator.clone(),
                Some(store),
                session,
                NewBillOptions::from(&config),
            );

            let selected = SelectedFile::from_path(&file, mime);
            let event = FileChangeEvent::single(file.to_string_lossy(), selected);
            let change = controller.handle_change_file(event).await;

            match &change.validation {
                Some(ValidationOutcome::Accepted(format)) => {
                    tracing::info!(format = %format, "Receipt accepted");
                }
                Some(ValidationOutcome::Rejected(reason)) => {
                    eprintln!("{}", reason.message());
                }
                None => {
                    anyhow::bail!("Could not read {}", file.display());
                }
            }

            page.set_field(FIELD_EXPENSE_TYPE, expense_type);
            page.set_field(FIELD_EXPENSE_NAME, name);
            page.set_field(FIELD_AMOUNT, amount);
            page.set_field(FIELD_DATEPICKER, date);
            page.set_field(FIELD_VAT, vat);
            page.set_field(FIELD_PCT, pct);
            page.set_field(FIELD_COMMENTARY, commentary);

            let outcome = controller.handle_submit(&*page).await;
            let bill = outcome.bill.clone();
            outcome.wait().await;

            match bill {
                Some(bill) => print_json(&bill)?,
                None => anyhow::bail!("No bill submitted: session has no user"),
            }
            if let Some(route) = navigator.current() {
                tracing::info!(route = %route, upload = ?change.upload, "Submitted");
            }
        }
        Commands::Sniff { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let format = detect_image_format(&bytes);
            print_json(&serde_json::json!({
                "file": path.display().to_string(),
                "signature": file_signature(&bytes),
                "format": format.to_string(),
                "mimeType": format.mime_type(),
                "size": bytes.len(),
            }))?;
        }
    }

    Ok(())
}
