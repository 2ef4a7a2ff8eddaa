//! HTTP auth boundary: register and login.
//!
//! The socket itself never authenticates — it just carries the bearer
//! token that this client obtained. Kept deliberately thin: two POSTs and
//! a token in the response body.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Credentials for `/auth/register` and `/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Client for the auth endpoints.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// `base_url` without a trailing slash, e.g. `https://play.example.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates an account.
    pub async fn register(&self, payload: &AuthPayload) -> Result<(), ClientError> {
        self.post("/auth/register", payload).await.map(|_| ())
    }

    /// Exchanges credentials for the bearer token the socket dials with.
    pub async fn login(&self, payload: &AuthPayload) -> Result<String, ClientError> {
        let response = self.post("/auth/login", payload).await?;
        let body: TokenResponse = response.json().await?;
        Ok(body.token)
    }

    async fn post(
        &self,
        path: &str,
        payload: &AuthPayload,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_default();
            tracing::debug!(%status, %message, path, "auth request rejected");
            Err(ClientError::AuthRejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}
