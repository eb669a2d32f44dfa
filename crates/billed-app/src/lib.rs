//! Billed front controllers
//!
//! `NewBill` drives the bill creation form (receipt validation, upload and
//! submission) and `Bills` drives the bill list. Everything the controllers
//! touch outside themselves (view, store, session storage, navigation) is a
//! trait injected at construction, with in-memory implementations for tests
//! and the CLI driver.

pub mod containers;
pub mod file;
pub mod navigation;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use containers::{Bills, FileChangeOutcome, NewBill, NewBillOptions, SubmitOutcome, UploadState};
pub use file::{FileChangeEvent, SelectedFile};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use session::{MemorySessionStorage, Session, SessionStorage};
pub use view::{BillRow, BillsPage, BillsView, FormFields, NewBillPage, NewBillView, ProofPreview};
