//! View adapters
//!
//! Controllers talk to the page through the `NewBillView` and `BillsView`
//! traits. `NewBillPage` and `BillsPage` are in-memory pages that record what
//! would be on screen.

mod bills;
mod new_bill;

pub use bills::{BillRow, BillsPage, BillsPageState, BillsView, ProofPreview};
pub use new_bill::{FileInputState, FormFields, NewBillPage, NewBillView};
