//! Configuration module
//!
//! Runtime settings for the controllers, the store backend and the CLI,
//! read from the environment (and an optional `.env` file).

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

const API_URL: &str = "http://localhost:5678";
const API_TIMEOUT_SECS: u64 = 30;
const MODAL_WIDTH_PX: u32 = 800;
const USER_EMAIL: &str = "a@a";

/// Store backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-memory store seeded with fixture bills
    Mock,
    /// Remote Billed REST API
    Api,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(StoreBackend::Mock),
            "api" => Ok(StoreBackend::Api),
            _ => Err(anyhow::anyhow!("Invalid store backend: {}", s)),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoreBackend::Mock => write!(f, "mock"),
            StoreBackend::Api => write!(f, "api"),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub store_backend: StoreBackend,
    pub api_url: String,
    pub api_timeout_secs: u64,
    /// Width of the proof preview modal, in pixels
    pub modal_width: u32,
    /// When set, the receipt upload waits for the signature check and is
    /// skipped for rejected files.
    pub gate_upload_on_signature: bool,
    /// Receipts above this size are rejected and not uploaded. No limit
    /// unless `BILLED_MAX_RECEIPT_SIZE_MB` is set.
    pub max_receipt_size_bytes: Option<usize>,
    /// Email seeded into the session by the CLI driver
    pub user_email: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            environment: "development".to_string(),
            store_backend: StoreBackend::Mock,
            api_url: API_URL.to_string(),
            api_timeout_secs: API_TIMEOUT_SECS,
            modal_width: MODAL_WIDTH_PX,
            gate_upload_on_signature: false,
            max_receipt_size_bytes: None,
            user_email: USER_EMAIL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let store_backend = match env::var("BILLED_STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::Mock,
        };

        let config = Config {
            environment: env::var("BILLED_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            store_backend,
            api_url: env::var("BILLED_API_URL").unwrap_or_else(|_| API_URL.to_string()),
            api_timeout_secs: env::var("BILLED_API_TIMEOUT_SECS")
                .unwrap_or_else(|_| API_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(API_TIMEOUT_SECS),
            modal_width: env::var("BILLED_MODAL_WIDTH")
                .unwrap_or_else(|_| MODAL_WIDTH_PX.to_string())
                .parse()
                .unwrap_or(MODAL_WIDTH_PX),
            gate_upload_on_signature: env::var("BILLED_GATE_UPLOAD_ON_SIGNATURE")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            max_receipt_size_bytes: env::var("BILLED_MAX_RECEIPT_SIZE_MB")
                .ok()
                .and_then(|mb| mb.trim().parse::<usize>().ok())
                .map(|mb| mb * 1024 * 1024),
            user_email: env::var("BILLED_USER_EMAIL").unwrap_or_else(|_| USER_EMAIL.to_string()),
        };

        config.validate()?;
        if config.is_production() && config.store_backend == StoreBackend::Mock {
            tracing::warn!("Running in production with the mock store backend");
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.store_backend == StoreBackend::Api && self.api_url.trim().is_empty() {
            anyhow::bail!("BILLED_API_URL must be set when BILLED_STORE_BACKEND=api");
        }
        if self.modal_width == 0 {
            anyhow::bail!("BILLED_MODAL_WIDTH must be greater than zero");
        }
        if self.max_receipt_size_bytes == Some(0) {
            anyhow::bail!("BILLED_MAX_RECEIPT_SIZE_MB must be greater than zero");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }
}
