use crate::file::{FileChangeEvent, SelectedFile};
use billed_core::constants::{
    CLASS_ACCEPTED, CLASS_REJECTED, FIELD_AMOUNT, FIELD_COMMENTARY, FIELD_DATEPICKER,
    FIELD_EXPENSE_NAME, FIELD_EXPENSE_TYPE, FIELD_PCT, FIELD_VAT,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Read access to the new bill form fields, by `data-testid`
pub trait FormFields: Send + Sync {
    /// Current value of `field`; empty when the field is absent
    fn value(&self, field: &str) -> String;
}

/// UI mutations performed by the receipt validator
pub trait NewBillView: Send + Sync {
    /// Remove every inline error marker
    fn clear_error_markers(&self);

    /// Style the file input as holding a valid receipt
    fn mark_file_accepted(&self);

    /// Clear the file input, style it as invalid and show `message` right
    /// after it. Any previous marker is replaced, never duplicated.
    fn mark_file_rejected(&self, message: &str);
}

/// Snapshot of the receipt input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInputState {
    pub value: String,
    pub classes: BTreeSet<String>,
    pub files: Vec<SelectedFile>,
}

impl FileInputState {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

#[derive(Default)]
struct PageState {
    fields: HashMap<String, String>,
    file_input: FileInputState,
    error_markers: Vec<String>,
}

/// In-memory new bill page
#[derive(Default)]
pub struct NewBillPage {
    state: Mutex<PageState>,
}

impl NewBillPage {
    pub const TITLE: &'static str = "Envoyer une note de frais";

    pub fn new() -> Self {
        let page = Self::default();
        {
            let mut state = page.state();
            for field in [
                FIELD_EXPENSE_TYPE,
                FIELD_EXPENSE_NAME,
                FIELD_DATEPICKER,
                FIELD_AMOUNT,
                FIELD_VAT,
                FIELD_PCT,
                FIELD_COMMENTARY,
            ] {
                state.fields.insert(field.to_string(), String::new());
            }
        }
        page
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_field(&self, field: &str, value: impl Into<String>) {
        self.state().fields.insert(field.to_string(), value.into());
    }

    /// Put `file` in the receipt input and return the resulting change event
    pub fn select_file(&self, value: impl Into<String>, file: SelectedFile) -> FileChangeEvent {
        let event = FileChangeEvent::single(value, file);
        let mut state = self.state();
        state.file_input.value = event.value.clone();
        state.file_input.files = event.files.clone();
        event
    }

    pub fn file_input(&self) -> FileInputState {
        self.state().file_input.clone()
    }

    /// Texts of the error markers currently displayed
    pub fn error_markers(&self) -> Vec<String> {
        self.state().error_markers.clone()
    }
}

impl FormFields for NewBillPage {
    fn value(&self, field: &str) -> String {
        self.state().fields.get(field).cloned().unwrap_or_default()
    }
}

impl NewBillView for NewBillPage {
    fn clear_error_markers(&self) {
        self.state().error_markers.clear();
    }

    fn mark_file_accepted(&self) {
        let mut state = self.state();
        state.file_input.classes.remove(CLASS_REJECTED);
        state.file_input.classes.insert(CLASS_ACCEPTED.to_string());
    }

    fn mark_file_rejected(&self, message: &str) {
        let mut state = self.state();
        state.file_input.value.clear();
        state.file_input.files.clear();
        state.file_input.classes.remove(CLASS_ACCEPTED);
        state.file_input.classes.insert(CLASS_REJECTED.to_string());
        state.error_markers.clear();
        state.error_markers.push(message.to_string());
    }
}
