use crate::traits::{BillStore, CreateRequest, FormPart, StoreError, StoreResult, UpdateRequest};
use crate::StoreBackend;
use async_trait::async_trait;
use billed_core::{Bill, StoredFile};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP store backed by the Billed REST API
///
/// Routes: `POST /bills` (multipart receipt upload), `PATCH /bills/{key}`
/// and `GET /bills`. Requests carry the session JWT as a bearer token.
#[derive(Clone, Debug)]
pub struct ApiStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiStore {
    pub fn new(base_url: String, timeout: Duration, token: Option<String>) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> StoreResult<T> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %response.url(), "Billed API request failed");
            return Err(StoreError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn to_multipart(request: CreateRequest) -> StoreResult<Form> {
        let mut form = Form::new();
        for (name, part) in request.data.parts().iter().cloned() {
            form = match part {
                FormPart::Text(value) => form.text(name, value),
                FormPart::File {
                    file_name,
                    content_type,
                    data,
                } => {
                    let part = Part::bytes(data.to_vec())
                        .file_name(file_name)
                        .mime_str(&content_type)
                        .map_err(|e| StoreError::Serialization(e.to_string()))?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl BillStore for ApiStore {
    async fn create(&self, request: CreateRequest) -> StoreResult<StoredFile> {
        let start = std::time::Instant::now();
        // reqwest always sets the multipart content type and boundary itself,
        // which is what `no_content_type` asks for.
        let form = Self::to_multipart(request)?;
        let stored: StoredFile = self
            .send(self.client.post(self.build_url("/bills")).multipart(form))
            .await?;

        tracing::info!(
            key = %stored.key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Receipt uploaded to Billed API"
        );
        Ok(stored)
    }

    async fn update(&self, request: UpdateRequest) -> StoreResult<Bill> {
        let selector = request.selector.as_deref().ok_or_else(|| {
            StoreError::ConfigError("Bill update requires a selector".to_string())
        })?;
        let bill = request.bill()?;

        self.send(
            self.client
                .patch(self.build_url(&format!("/bills/{}", selector)))
                .json(&bill),
        )
        .await
    }

    async fn list(&self) -> StoreResult<Vec<Bill>> {
        self.send(self.client.get(self.build_url("/bills"))).await
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Api
    }
}
