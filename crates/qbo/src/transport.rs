//! HTTP transport seam.
//!
//! The submission flow talks to [`QboTransport`] only; the `reqwest`-backed
//! [`HttpTransport`] is the production implementation, and tests drive the
//! same flow against a local stub server.

use serde::de::DeserializeOwned;

use crate::config::{QboConfig, TOKEN_URL};
use crate::error::{SyncError, SyncResult};

/// A provider response reduced to what the flow needs: status, correlation
/// id, raw body.
#[derive(Debug, Clone)]
pub struct QboResponse {
    pub status: u16,
    pub intuit_tid: Option<String>,
    pub body: String,
}

impl QboResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn json<T: DeserializeOwned>(&self) -> SyncResult<T> {
        serde_json::from_str(&self.body).map_err(|e| SyncError::Parse(e.to_string()))
    }
}

/// Entities the flow creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Customer,
    Item,
    Invoice,
}

impl Entity {
    fn path(&self) -> &'static str {
        match self {
            Entity::Customer => "customer",
            Entity::Item => "item",
            Entity::Invoice => "invoice",
        }
    }
}

/// The calls one submission makes. `context` tags the step for diagnostics.
#[async_trait::async_trait]
pub trait QboTransport: Send + Sync {
    /// `GET /v3/company/{realm}/query` with a QBO query string.
    async fn query(
        &self,
        context: &'static str,
        access_token: &str,
        query: &str,
    ) -> SyncResult<QboResponse>;

    /// `POST /v3/company/{realm}/{entity}` with a JSON body.
    async fn create(
        &self,
        context: &'static str,
        access_token: &str,
        entity: Entity,
        body: serde_json::Value,
    ) -> SyncResult<QboResponse>;

    /// `POST` to the OAuth token endpoint with Basic auth and a
    /// `grant_type=refresh_token` form body.
    async fn refresh_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> SyncResult<QboResponse>;
}

/// Production transport.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token_url: String,
    realm_id: String,
}

impl HttpTransport {
    pub fn new(config: &QboConfig) -> Self {
        Self::with_urls(config.base_url(), TOKEN_URL, &config.realm_id)
    }

    /// Explicit URLs, for pointing at a stub server.
    pub fn with_urls(
        base_url: impl Into<String>,
        token_url: impl Into<String>,
        realm_id: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token_url: token_url.into(),
            realm_id: realm_id.into(),
        }
    }

    async fn reduce(
        context: &'static str,
        response: reqwest::Response,
    ) -> SyncResult<QboResponse> {
        let status = response.status().as_u16();
        // The provider sends the correlation id as either `intuit_tid` or
        // `Intuit-Tid` depending on the endpoint; check both names.
        let headers = response.headers();
        let intuit_tid = headers
            .get("intuit_tid")
            .or_else(|| headers.get("Intuit-Tid"))
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::network(context, e.to_string()))?;
        Ok(QboResponse { status, intuit_tid, body })
    }
}

#[async_trait::async_trait]
impl QboTransport for HttpTransport {
    async fn query(
        &self,
        context: &'static str,
        access_token: &str,
        query: &str,
    ) -> SyncResult<QboResponse> {
        let response = self
            .client
            .get(format!("{}/v3/company/{}/query", self.base_url, self.realm_id))
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| SyncError::network(context, e.to_string()))?;
        Self::reduce(context, response).await
    }

    async fn create(
        &self,
        context: &'static str,
        access_token: &str,
        entity: Entity,
        body: serde_json::Value,
    ) -> SyncResult<QboResponse> {
        let response = self
            .client
            .post(format!("{}/v3/company/{}/{}", self.base_url, self.realm_id, entity.path()))
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::network(context, e.to_string()))?;
        Self::reduce(context, response).await
    }

    async fn refresh_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> SyncResult<QboResponse> {
        let context = "token_refresh";
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(client_id, Some(client_secret))
            .header("Accept", "application/json")
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .send()
            .await
            .map_err(|e| SyncError::network(context, e.to_string()))?;
        Self::reduce(context, response).await
    }
}
