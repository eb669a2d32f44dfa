//! Page controllers.

mod bills;
mod new_bill;

pub use bills::Bills;
pub use new_bill::{read_draft, FileChangeOutcome, NewBill, NewBillOptions, SubmitOutcome, UploadState};
