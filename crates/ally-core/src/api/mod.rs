//! Thin REST clients over the backend.
//!
//! Every resource client holds a clone of one [`ApiClient`]. The clones share
//! the base URL and the bearer token slot, so attaching or detaching a token
//! is visible to all of them at once. The slot is read when a request is
//! built: a request racing a logout may go out with the old token.

mod ai;
mod auth;
mod journals;
mod moods;

pub use ai::AiClient;
pub use auth::{AuthApi, AuthClient};
pub use journals::JournalsClient;
pub use moods::MoodsClient;

use std::sync::{Arc, RwLock};

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AllyConfig;
use crate::error::{AllyError, Result};
use crate::model::ListQuery;

/// Shared HTTP client: base URL plus the default `Authorization` header.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_config(config: &AllyConfig) -> Self {
        Self::new(&config.api.url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach (`Some`) or detach (`None`) the bearer token for every clone.
    pub fn set_token(&self, token: Option<&str>) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = token.map(str::to_string);
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.clone())
    }

    pub fn journals(&self) -> JournalsClient {
        JournalsClient::new(self.clone())
    }

    pub fn moods(&self) -> MoodsClient {
        MoodsClient::new(self.clone())
    }

    pub fn ai(&self) -> AiClient {
        AiClient::new(self.clone())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "api request");
        let req = self.client.request(method, self.url(path));
        match self.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<reqwest::Response> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "api request rejected");
            return Err(AllyError::from_response(status.as_u16(), &body));
        }
        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = self.send(req).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<T> {
        let mut req = self.request(Method::GET, path);
        if !query.is_empty() {
            req = req.query(query);
        }
        self.send_json(req).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn post_form<B, T>(&self, path: &str, form: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, path).form(form))
            .await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::PUT, path).json(body))
            .await
    }

    /// DELETE whose response body (usually `204 No Content`) is discarded.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}
