use crate::file::{FileChangeEvent, SelectedFile};
use crate::navigation::{Navigator, Route};
use crate::session::Session;
use crate::view::{FormFields, NewBillView};
use billed_core::constants::{
    FIELD_AMOUNT, FIELD_COMMENTARY, FIELD_DATEPICKER, FIELD_EXPENSE_NAME, FIELD_EXPENSE_TYPE,
    FIELD_PCT, FIELD_VAT, MULTIPART_EMAIL_FIELD, MULTIPART_FILE_FIELD,
};
use billed_core::validation::{check_receipt_size, display_file_name};
use billed_core::{validate_receipt, Bill, BillDraft, Config, ValidationOutcome};
use billed_store::{BillStore, CreateRequest, MultipartForm, RequestHeaders, UpdateRequest};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Progress of the receipt upload backing the next submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
pub struct NewBillOptions {
    /// Wait for the signature check and skip the upload of rejected files.
    /// Off by default: the upload is issued alongside the check.
    pub gate_upload_on_signature: bool,
    /// Optional size limit; oversized receipts are rejected and not uploaded
    pub max_receipt_size_bytes: Option<usize>,
}

impl Default for NewBillOptions {
    fn default() -> Self {
        NewBillOptions::from(&Config::default())
    }
}

impl From<&Config> for NewBillOptions {
    fn from(config: &Config) -> Self {
        NewBillOptions {
            gate_upload_on_signature: config.gate_upload_on_signature,
            max_receipt_size_bytes: config.max_receipt_size_bytes,
        }
    }
}

/// Result of one file input change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChangeOutcome {
    /// `None` when nothing was selected or the file could not be read
    pub validation: Option<ValidationOutcome>,
    /// Upload state left by this change
    pub upload: UploadState,
}

/// Result of a form submission
///
/// Navigation has already happened; `update` is the background store call,
/// which callers may await but never have to.
pub struct SubmitOutcome {
    pub bill: Option<Bill>,
    pub update: Option<JoinHandle<()>>,
}

impl SubmitOutcome {
    /// Wait for the background update to finish
    pub async fn wait(self) {
        if let Some(handle) = self.update {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Bill update task panicked");
            }
        }
    }
}

#[derive(Debug, Default)]
struct FileState {
    file_url: Option<String>,
    file_name: Option<String>,
    bill_id: Option<String>,
    upload: UploadState,
}

/// Controller of the new bill form
pub struct NewBill {
    view: Arc<dyn NewBillView>,
    navigator: Arc<dyn Navigator>,
    store: Option<Arc<dyn BillStore>>,
    session: Session,
    options: NewBillOptions,
    state: Mutex<FileState>,
}

impl NewBill {
    pub fn new(
        view: Arc<dyn NewBillView>,
        navigator: Arc<dyn Navigator>,
        store: Option<Arc<dyn BillStore>>,
        session: Session,
        options: NewBillOptions,
    ) -> Self {
        Self {
            view,
            navigator,
            store,
            session,
            options,
            state: Mutex::new(FileState::default()),
        }
    }

    pub async fn file_url(&self) -> Option<String> {
        self.state.lock().await.file_url.clone()
    }

    pub async fn file_name(&self) -> Option<String> {
        self.state.lock().await.file_name.clone()
    }

    /// Key of the uploaded receipt, used as the update selector
    pub async fn bill_id(&self) -> Option<String> {
        self.state.lock().await.bill_id.clone()
    }

    pub async fn upload_state(&self) -> UploadState {
        self.state.lock().await.upload
    }

    /// Validate and upload the receipt picked in the file input.
    ///
    /// Only the first selected file is considered. Unless the options gate
    /// it, the upload runs concurrently with the signature check and is not
    /// cancelled by a rejection. A newer selection does not cancel an older
    /// one still in flight; whichever upload finishes last wins.
    pub async fn handle_change_file(&self, event: FileChangeEvent) -> FileChangeOutcome {
        self.view.clear_error_markers();

        let Some(file) = event.files.into_iter().next() else {
            tracing::debug!("File input changed without a selection");
            return FileChangeOutcome {
                validation: None,
                upload: self.upload_state().await,
            };
        };

        let file_name = display_file_name(&event.value);
        self.state.lock().await.file_name = Some(file_name.clone());

        if self.options.gate_upload_on_signature {
            let validation = self.validate_file(&file).await;
            let upload = match &validation {
                Some(outcome) if outcome.is_accepted() => {
                    self.upload_file(&file, &file_name).await
                }
                _ => {
                    // The rejected file replaces whatever was uploaded before
                    let mut state = self.state.lock().await;
                    *state = FileState::default();
                    state.upload
                }
            };
            return FileChangeOutcome { validation, upload };
        }

        let (validation, upload) = tokio::join!(
            self.validate_file(&file),
            self.upload_file(&file, &file_name)
        );
        FileChangeOutcome { validation, upload }
    }

    async fn validate_file(&self, file: &SelectedFile) -> Option<ValidationOutcome> {
        let bytes = match file.read().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, file = %file.name, "Failed to read selected receipt");
                return None;
            }
        };

        let too_large = self
            .options
            .max_receipt_size_bytes
            .and_then(|max| check_receipt_size(bytes.len(), max));
        let outcome = match too_large {
            Some(reason) => ValidationOutcome::Rejected(reason),
            None => validate_receipt(&bytes, &file.mime_type),
        };
        self.apply_validation(file, &outcome);
        Some(outcome)
    }

    fn apply_validation(&self, file: &SelectedFile, outcome: &ValidationOutcome) {
        match outcome {
            ValidationOutcome::Accepted(format) => {
                tracing::debug!(file = %file.name, format = %format, "Receipt accepted");
                self.view.mark_file_accepted();
            }
            ValidationOutcome::Rejected(reason) => {
                tracing::warn!(
                    file = %file.name,
                    declared = %file.mime_type,
                    reason = ?reason,
                    "Receipt rejected"
                );
                self.view.mark_file_rejected(&reason.message());
            }
        }
    }

    async fn upload_file(&self, file: &SelectedFile, file_name: &str) -> UploadState {
        let Some(store) = self.store.clone() else {
            tracing::debug!("No store configured, receipt not uploaded");
            return self.upload_state().await;
        };

        self.state.lock().await.upload = UploadState::Uploading;

        let email = match self.session.user_email() {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(error = %e, "Cannot upload receipt without a session user");
                return self.finish_upload(UploadState::Failed).await;
            }
        };

        let data = match file.read().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, file = %file.name, "Failed to read receipt for upload");
                return self.finish_upload(UploadState::Failed).await;
            }
        };

        if let Some(max) = self.options.max_receipt_size_bytes {
            if data.len() > max {
                tracing::warn!(size = data.len(), max, file = %file.name, "Receipt too large, not uploaded");
                return self.finish_upload(UploadState::Failed).await;
            }
        }

        let mut form = MultipartForm::new();
        form.append_file(MULTIPART_FILE_FIELD, &file.name, &file.mime_type, data);
        form.append_text(MULTIPART_EMAIL_FIELD, email);

        let request = CreateRequest {
            data: form,
            headers: RequestHeaders {
                no_content_type: true,
            },
        };

        match store.create(request).await {
            Ok(stored) => {
                tracing::info!(file_url = %stored.file_url, key = %stored.key, "Receipt uploaded");
                let mut state = self.state.lock().await;
                state.bill_id = Some(stored.key);
                state.file_url = Some(stored.file_url);
                state.file_name = Some(file_name.to_string());
                state.upload = UploadState::Ready;
                UploadState::Ready
            }
            Err(e) => {
                tracing::error!(error = %e, "Receipt upload failed");
                self.finish_upload(UploadState::Failed).await
            }
        }
    }

    async fn finish_upload(&self, upload: UploadState) -> UploadState {
        self.state.lock().await.upload = upload;
        upload
    }

    /// Build the bill from the form, send it to the store in the background
    /// and show the bill list.
    ///
    /// Navigation never waits for the store. Submitting before the receipt
    /// upload finished sends whatever file identifiers are known at that
    /// point (possibly none).
    pub async fn handle_submit(&self, form: &dyn FormFields) -> SubmitOutcome {
        let draft = read_draft(form);
        tracing::debug!(date = %draft.date, "Submitting bill");

        let outcome = match self.session.user_email() {
            Ok(email) => {
                let (file_url, file_name, bill_id, upload) = {
                    let state = self.state.lock().await;
                    (
                        state.file_url.clone(),
                        state.file_name.clone(),
                        state.bill_id.clone(),
                        state.upload,
                    )
                };
                if upload != UploadState::Ready {
                    tracing::warn!(
                        upload_state = ?upload,
                        "Submitting bill before the receipt upload completed"
                    );
                }

                let bill = draft.into_bill(email, file_url, file_name);
                let update = self.store.clone().map(|store| {
                    let bill = bill.clone();
                    tokio::spawn(async move { update_bill(store, bill, bill_id).await })
                });
                SubmitOutcome {
                    bill: Some(bill),
                    update,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot submit bill without a session user");
                SubmitOutcome {
                    bill: None,
                    update: None,
                }
            }
        };

        self.navigator.navigate(Route::Bills);
        outcome
    }
}

/// Capture the form values at submit time
pub fn read_draft(form: &dyn FormFields) -> BillDraft {
    BillDraft {
        expense_type: form.value(FIELD_EXPENSE_TYPE),
        name: form.value(FIELD_EXPENSE_NAME),
        amount: form.value(FIELD_AMOUNT),
        date: form.value(FIELD_DATEPICKER),
        vat: form.value(FIELD_VAT),
        pct: form.value(FIELD_PCT),
        commentary: form.value(FIELD_COMMENTARY),
    }
}

async fn update_bill(store: Arc<dyn BillStore>, bill: Bill, selector: Option<String>) {
    let request = match UpdateRequest::new(&bill, selector) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize bill");
            return;
        }
    };

    match store.update(request).await {
        Ok(saved) => tracing::info!(bill_id = ?saved.id, "Bill saved"),
        Err(e) => tracing::error!(error = %e, "Bill update failed"),
    }
}
