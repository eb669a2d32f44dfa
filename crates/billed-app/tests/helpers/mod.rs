//! Test helpers: wire controllers to in-memory pages, a recording navigator
//! and the mock store.
//!
//! Run with: `cargo test -p billed-app`

#![allow(dead_code)]

pub mod fixtures;

use billed_app::{
    Bills, BillsPage, NewBill, NewBillOptions, NewBillPage, RecordingNavigator, Session,
};
use billed_core::User;
use billed_store::{BillStore, MockStore};
use std::sync::Arc;

pub const TEST_EMAIL: &str = "a@a";

pub fn employee_session() -> Session {
    Session::in_memory(&User::employee(TEST_EMAIL)).expect("Failed to seed session")
}

/// New bill controller with handles on everything it talks to.
pub struct NewBillApp {
    pub page: Arc<NewBillPage>,
    pub navigator: Arc<RecordingNavigator>,
    pub store: MockStore,
    pub controller: NewBill,
}

pub fn setup_new_bill(store: MockStore, options: NewBillOptions) -> NewBillApp {
    setup_new_bill_with_session(store, options, employee_session())
}

pub fn setup_new_bill_with_session(
    store: MockStore,
    options: NewBillOptions,
    session: Session,
) -> NewBillApp {
    let page = Arc::new(NewBillPage::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let shared: Arc<dyn BillStore> = Arc::new(store.clone());
    let controller = NewBill::new(
        page.clone(),
        navigator.clone(),
        Some(shared),
        session,
        options,
    );
    NewBillApp {
        page,
        navigator,
        store,
        controller,
    }
}

/// Bills controller with handles on everything it talks to.
pub struct BillsApp {
    pub page: Arc<BillsPage>,
    pub navigator: Arc<RecordingNavigator>,
    pub store: MockStore,
    pub controller: Bills,
}

pub fn setup_bills(store: MockStore, modal_width: u32) -> BillsApp {
    let page = Arc::new(BillsPage::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let shared: Arc<dyn BillStore> = Arc::new(store.clone());
    let controller = Bills::new(page.clone(), navigator.clone(), Some(shared), modal_width);
    BillsApp {
        page,
        navigator,
        store,
        controller,
    }
}
