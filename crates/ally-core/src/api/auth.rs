use std::future::Future;

use super::ApiClient;
use crate::error::Result;
use crate::model::{NewUser, TokenResponse, User};

/// Authentication operations the session controller depends on.
///
/// [`AuthClient`] is the HTTP implementation; tests substitute their own.
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token (`POST /auth/token`).
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<TokenResponse>> + Send;

    /// Create an account (`POST /auth/register`).
    fn register(&self, user: &NewUser) -> impl Future<Output = Result<User>> + Send;

    /// Profile of the token holder (`GET /auth/me`).
    fn me(&self) -> impl Future<Output = Result<User>> + Send;

    /// Attach or detach the bearer token on the shared HTTP client.
    fn set_token(&self, token: Option<&str>);
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

impl AuthApi for AuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        // OAuth2 password flow: the email goes in the `username` field.
        let form = [("username", email), ("password", password)];
        self.api.post_form("/auth/token", &form).await
    }

    async fn register(&self, user: &NewUser) -> Result<User> {
        self.api.post("/auth/register", user).await
    }

    async fn me(&self) -> Result<User> {
        self.api.get("/auth/me").await
    }

    fn set_token(&self, token: Option<&str>) {
        self.api.set_token(token);
    }
}
