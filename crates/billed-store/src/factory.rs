#[cfg(feature = "store-api")]
use crate::ApiStore;
#[cfg(feature = "store-mock")]
use crate::MockStore;
use crate::{BillStore, StoreBackend, StoreError, StoreResult};
use billed_core::Config;
use std::sync::Arc;

/// Create a store backend based on configuration
///
/// `token` is the session JWT, only used by the API backend.
pub fn create_store(config: &Config, token: Option<String>) -> StoreResult<Arc<dyn BillStore>> {
    match config.store_backend {
        #[cfg(feature = "store-mock")]
        StoreBackend::Mock => {
            let _ = token;
            Ok(Arc::new(MockStore::new()))
        }

        #[cfg(not(feature = "store-mock"))]
        StoreBackend::Mock => Err(StoreError::ConfigError(
            "Mock store backend not available (store-mock feature not enabled)".to_string(),
        )),

        #[cfg(feature = "store-api")]
        StoreBackend::Api => {
            if config.api_url.trim().is_empty() {
                return Err(StoreError::ConfigError(
                    "BILLED_API_URL not configured".to_string(),
                ));
            }
            let store = ApiStore::new(
                config.api_url.clone(),
                std::time::Duration::from_secs(config.api_timeout_secs),
                token,
            )?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-api"))]
        StoreBackend::Api => Err(StoreError::ConfigError(
            "API store backend not available (store-api feature not enabled)".to_string(),
        )),
    }
}
