use crate::navigation::{Navigator, Route};
use crate::view::{BillRow, BillsView, ProofPreview};
use billed_core::constants::PROOF_IMAGE_WIDTH_RATIO;
use billed_core::format::{format_date, format_status};
use billed_core::{AppError, Bill, ErrorMetadata};
use billed_store::BillStore;
use std::sync::Arc;

/// Controller of the employee bill list
pub struct Bills {
    view: Arc<dyn BillsView>,
    navigator: Arc<dyn Navigator>,
    store: Option<Arc<dyn BillStore>>,
    modal_width: u32,
}

impl Bills {
    pub fn new(
        view: Arc<dyn BillsView>,
        navigator: Arc<dyn Navigator>,
        store: Option<Arc<dyn BillStore>>,
        modal_width: u32,
    ) -> Self {
        Self {
            view,
            navigator,
            store,
            modal_width,
        }
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// Open the proof preview for the eye icon of a row
    pub fn handle_click_icon_eye(&self, bill_url: &str) {
        let width = (self.modal_width as f64 * PROOF_IMAGE_WIDTH_RATIO).floor() as u32;
        self.view.open_proof_modal(ProofPreview {
            image_url: bill_url.to_string(),
            width,
        });
    }

    /// Fetch the bills and turn them into display rows, latest first.
    pub async fn get_bills(&self) -> Result<Vec<BillRow>, AppError> {
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };

        let mut bills = store.list().await?;
        bills.sort_by(|a, b| b.date.cmp(&a.date));

        let rows: Vec<BillRow> = bills.into_iter().map(to_row).collect();
        tracing::debug!(count = rows.len(), "Fetched bills");
        Ok(rows)
    }

    /// Render the list page, or the error page with the store's message
    pub async fn load(&self) {
        self.view.render_loading();
        match self.get_bills().await {
            Ok(rows) => self.view.render_bills(&rows),
            Err(e) => {
                tracing::error!(error = %e, code = e.error_code(), "Failed to fetch bills");
                self.view.render_error(&e.client_message());
            }
        }
    }
}

fn to_row(bill: Bill) -> BillRow {
    let date = match format_date(&bill.date) {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!(error = %e, date = %bill.date, bill_id = ?bill.id, "Unformattable bill date");
            bill.date.clone()
        }
    };

    BillRow {
        id: bill.id,
        expense_type: bill.expense_type,
        name: bill.name,
        date,
        raw_date: bill.date,
        amount: bill.amount,
        status: format_status(bill.status).to_string(),
        file_url: bill.file_url,
    }
}
