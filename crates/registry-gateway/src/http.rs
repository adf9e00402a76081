//! HTTP implementation of the gateway
//!
//! Maps the trait onto the registry backend's REST routes. The session
//! bearer token rides on every request; status codes map onto the error
//! taxonomy in `error.rs`.

use crate::error::GatewayError;
use crate::params::ListParams;
use crate::session::Session;
use crate::traits::ResidentGateway;
use async_trait::async_trait;
use registry_model::{
    AssistanceId, AssistancePayload, AssistanceRecord, DirectoryPage, PromotionRequest, Resident,
    ResidentId,
};
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway backed by the registry's REST API
pub struct HttpGateway {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpGateway {
    /// Create a gateway for a backend base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_timeout(base_url, session, DEFAULT_TIMEOUT)
    }

    /// Create a gateway from a client configuration
    #[must_use]
    pub fn from_config(config: &crate::config::RegistryConfig, session: Session) -> Self {
        Self::with_timeout(config.base_url.clone(), session, config.request_timeout)
    }

    /// Create a gateway with a custom request timeout
    #[must_use]
    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Session,
        timeout: Duration,
    ) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Session this gateway authenticates with
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response onto the error taxonomy
    async fn check(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = Self::server_message(response).await;
        tracing::warn!(status = status.as_u16(), %message, "registry request rejected");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GatewayError::Unauthorized),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(GatewayError::Validation { message })
            }
            _ => Err(GatewayError::Server {
                status: status.as_u16(),
                message,
            }),
        }
    }

    /// Pull the server-provided message out of an error body, if any
    async fn server_message(response: Response) -> String {
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or(body)
    }

    async fn post_empty(&self, path: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url(path))
            .header(header::AUTHORIZATION, self.session.bearer())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ResidentGateway for HttpGateway {
    async fn list_residents(&self, params: ListParams) -> Result<DirectoryPage, GatewayError> {
        tracing::debug!(skip = params.skip, limit = params.limit, "listing residents");
        let response = self
            .client
            .get(self.url("/residents"))
            .header(header::AUTHORIZATION, self.session.bearer())
            .query(&params.query_pairs())
            .send()
            .await?;
        let response = Self::check(response).await?;
        let page = response
            .json::<DirectoryPage>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(page)
    }

    async fn archive_resident(&self, id: ResidentId) -> Result<(), GatewayError> {
        self.post_empty(&format!("/residents/{id}/archive")).await
    }

    async fn restore_resident(&self, id: ResidentId) -> Result<(), GatewayError> {
        self.post_empty(&format!("/residents/{id}/restore")).await
    }

    async fn promote_head(
        &self,
        resident_id: ResidentId,
        request: PromotionRequest,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("/residents/{resident_id}/promote-head")))
            .header(header::AUTHORIZATION, self.session.bearer())
            .json(&request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn create_assistance(
        &self,
        resident_id: ResidentId,
        payload: AssistancePayload,
    ) -> Result<AssistanceRecord, GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("/residents/{resident_id}/assistance")))
            .header(header::AUTHORIZATION, self.session.bearer())
            .json(&payload)
            .send()
            .await?;
        let response = Self::check(response).await?;
        response
            .json::<AssistanceRecord>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn update_assistance(
        &self,
        record_id: AssistanceId,
        payload: AssistancePayload,
    ) -> Result<AssistanceRecord, GatewayError> {
        let response = self
            .client
            .put(self.url(&format!("/assistance/{record_id}")))
            .header(header::AUTHORIZATION, self.session.bearer())
            .json(&payload)
            .send()
            .await?;
        let response = Self::check(response).await?;
        response
            .json::<AssistanceRecord>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn delete_assistance(&self, record_id: AssistanceId) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url(&format!("/assistance/{record_id}")))
            .header(header::AUTHORIZATION, self.session.bearer())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_archived_residents(&self) -> Result<Vec<Resident>, GatewayError> {
        let response = self
            .client
            .get(self.url("/residents/archived"))
            .header(header::AUTHORIZATION, self.session.bearer())
            .send()
            .await?;
        let response = Self::check(response).await?;
        response
            .json::<Vec<Resident>>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}
