use std::sync::{Mutex, MutexGuard, PoisonError};

/// One line of the bill list, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillRow {
    pub id: Option<String>,
    pub expense_type: String,
    pub name: String,
    /// Display date (`4 Avr. 04`), or the raw value when it could not be formatted
    pub date: String,
    /// Raw ISO date, used for ordering
    pub raw_date: String,
    pub amount: Option<i64>,
    pub status: String,
    /// Proof image opened by the row's eye icon
    pub file_url: Option<String>,
}

/// Content of the proof preview modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofPreview {
    pub image_url: String,
    pub width: u32,
}

/// Rendering surface of the bill list
pub trait BillsView: Send + Sync {
    fn render_loading(&self);
    fn render_bills(&self, rows: &[BillRow]);
    /// Show the error page with `message` as literal text
    fn render_error(&self, message: &str);
    fn open_proof_modal(&self, preview: ProofPreview);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BillsPageState {
    #[default]
    Empty,
    Loading,
    Loaded(Vec<BillRow>),
    Error(String),
}

#[derive(Default)]
struct PageState {
    content: BillsPageState,
    modal: Option<ProofPreview>,
}

/// In-memory bill list page
#[derive(Default)]
pub struct BillsPage {
    state: Mutex<PageState>,
}

impl BillsPage {
    pub const TITLE: &'static str = "Mes notes de frais";

    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn content(&self) -> BillsPageState {
        self.state().content.clone()
    }

    pub fn rows(&self) -> Vec<BillRow> {
        match self.content() {
            BillsPageState::Loaded(rows) => rows,
            _ => Vec::new(),
        }
    }

    /// Preview currently shown, if the modal is open
    pub fn modal(&self) -> Option<ProofPreview> {
        self.state().modal.clone()
    }

    /// Visible text of the page
    pub fn text(&self) -> String {
        match self.content() {
            BillsPageState::Empty => String::new(),
            BillsPageState::Loading => "Loading...".to_string(),
            BillsPageState::Error(message) => format!("Erreur\n{}", message),
            BillsPageState::Loaded(rows) => {
                let mut text = Self::TITLE.to_string();
                for row in rows {
                    text.push_str(&format!(
                        "\n{}\t{}\t{}\t{} €\t{}",
                        row.expense_type,
                        row.name,
                        row.date,
                        row.amount.map(|a| a.to_string()).unwrap_or_default(),
                        row.status
                    ));
                }
                text
            }
        }
    }
}

impl BillsView for BillsPage {
    fn render_loading(&self) {
        self.state().content = BillsPageState::Loading;
    }

    fn render_bills(&self, rows: &[BillRow]) {
        self.state().content = BillsPageState::Loaded(rows.to_vec());
    }

    fn render_error(&self, message: &str) {
        self.state().content = BillsPageState::Error(message.to_string());
    }

    fn open_proof_modal(&self, preview: ProofPreview) {
        self.state().modal = Some(preview);
    }
}
