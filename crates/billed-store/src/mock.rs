use crate::fixtures::{fixture_bills, MOCK_FILE_KEY, MOCK_FILE_URL};
use crate::traits::{BillStore, CreateRequest, StoreError, StoreResult, UpdateRequest};
use crate::StoreBackend;
use async_trait::async_trait;
use billed_core::constants::{MULTIPART_EMAIL_FIELD, MULTIPART_FILE_FIELD};
use billed_core::{Bill, StoredFile};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use uuid::Uuid;

/// Receipt upload seen by the mock store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCreate {
    pub file_name: Option<String>,
    pub email: Option<String>,
    pub request: CreateRequest,
}

#[derive(Default)]
struct MockState {
    bills: Vec<Bill>,
    creates: Vec<RecordedCreate>,
    updates: Vec<UpdateRequest>,
    list_calls: usize,
    fail_create: Option<StoreError>,
    fail_update: Option<StoreError>,
    fail_list: Option<StoreError>,
}

/// In-memory store seeded with fixture bills
///
/// Failures are injected one call at a time with the `fail_next_*` methods.
/// Clones share state, so a test can keep a handle while the controller owns
/// another.
#[derive(Clone)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
    create_delay: Option<Duration>,
}

impl MockStore {
    /// Create a mock store holding the fixture bills
    pub fn new() -> Self {
        Self::with_bills(fixture_bills())
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                bills,
                ..MockState::default()
            })),
            create_delay: None,
        }
    }

    /// Delay every receipt upload, to exercise submit-before-upload ordering
    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fail_next_create(&self, error: StoreError) {
        self.state().fail_create = Some(error);
    }

    pub fn fail_next_update(&self, error: StoreError) {
        self.state().fail_update = Some(error);
    }

    pub fn fail_next_list(&self, error: StoreError) {
        self.state().fail_list = Some(error);
    }

    pub fn creates(&self) -> Vec<RecordedCreate> {
        self.state().creates.clone()
    }

    pub fn updates(&self) -> Vec<UpdateRequest> {
        self.state().updates.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state().list_calls
    }

    pub fn bills(&self) -> Vec<Bill> {
        self.state().bills.clone()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillStore for MockStore {
    async fn create(&self, request: CreateRequest) -> StoreResult<StoredFile> {
        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state();
        let file_name = match request.data.get(MULTIPART_FILE_FIELD) {
            Some(crate::FormPart::File { file_name, .. }) => Some(file_name.clone()),
            _ => None,
        };
        let email = request.data.text(MULTIPART_EMAIL_FIELD).map(String::from);
        state.creates.push(RecordedCreate {
            file_name,
            email,
            request,
        });

        if let Some(error) = state.fail_create.take() {
            return Err(error);
        }

        Ok(StoredFile {
            file_url: MOCK_FILE_URL.to_string(),
            key: MOCK_FILE_KEY.to_string(),
        })
    }

    async fn update(&self, request: UpdateRequest) -> StoreResult<Bill> {
        let mut state = self.state();
        state.updates.push(request.clone());

        if let Some(error) = state.fail_update.take() {
            return Err(error);
        }

        let mut bill = request.bill()?;
        let id = request
            .selector
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        bill.id = Some(id.clone());

        match state
            .bills
            .iter_mut()
            .find(|existing| existing.id.as_deref() == Some(id.as_str()))
        {
            Some(existing) => *existing = bill.clone(),
            None => state.bills.push(bill.clone()),
        }

        tracing::debug!(bill_id = %id, "Mock store saved bill");
        Ok(bill)
    }

    async fn list(&self) -> StoreResult<Vec<Bill>> {
        let mut state = self.state();
        state.list_calls += 1;

        if let Some(error) = state.fail_list.take() {
            return Err(error);
        }

        Ok(state.bills.clone())
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MultipartForm, RequestHeaders};
    use billed_core::BillDraft;
    use bytes::Bytes;

    fn create_request() -> CreateRequest {
        let mut data = MultipartForm::new();
        data.append_file(
            MULTIPART_FILE_FIELD,
            "receipt.png",
            "image/png",
            Bytes::from_static(&[0x89, 0x50, 0x4E, 0x47]),
        );
        data.append_text(MULTIPART_EMAIL_FIELD, "a@a");
        CreateRequest {
            data,
            headers: RequestHeaders {
                no_content_type: true,
            },
        }
    }

    #[tokio::test]
    async fn create_records_upload_and_returns_fixed_file() {
        let store = MockStore::new();
        let stored = store.create(create_request()).await.unwrap();

        assert_eq!(stored.file_url, "https://localhost:3456/images/test.jpg");
        assert_eq!(stored.key, "1234");

        let creates = store.creates();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].file_name.as_deref(), Some("receipt.png"));
        assert_eq!(creates[0].email.as_deref(), Some("a@a"));
    }

    #[tokio::test]
    async fn injected_failure_applies_once() {
        let store = MockStore::new();
        store.fail_next_list(StoreError::not_found());

        let err = store.list().await.unwrap_err();
        assert_eq!(err.to_string(), "Erreur 404");
        assert_eq!(store.list().await.unwrap().len(), 4);
        assert_eq!(store.list_calls(), 2);
    }

    #[tokio::test]
    async fn update_inserts_under_selector() {
        let store = MockStore::new();
        let bill = BillDraft {
            expense_type: "Transports".to_string(),
            name: "Vol".to_string(),
            amount: "300".to_string(),
            date: "2024-08-08".to_string(),
            ..BillDraft::default()
        }
        .into_bill("a@a", None, None);

        let request = UpdateRequest::new(&bill, Some("1234".to_string())).unwrap();
        let saved = store.update(request).await.unwrap();

        assert_eq!(saved.id.as_deref(), Some("1234"));
        assert_eq!(store.bills().len(), 5);
        assert_eq!(store.updates().len(), 1);
    }

    #[tokio::test]
    async fn failed_update_is_still_recorded() {
        let store = MockStore::new();
        store.fail_next_update(StoreError::server());
        let bill = BillDraft::default().into_bill("a@a", None, None);

        let err = store
            .update(UpdateRequest::new(&bill, None).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::server());
        assert_eq!(store.updates().len(), 1);
        assert_eq!(store.bills().len(), 4);
    }
}
