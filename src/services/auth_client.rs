use async_trait::async_trait;
use reqwest::Client;

use crate::models::errors::AppError;
use crate::models::quote::{ApiResponse, AuthData, LoginRequest, RegisterRequest};
use crate::services::quote_client::read_envelope;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Credential endpoints of the remote service.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<AuthData>, AppError>;

    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse<AuthData>, AppError>;
}

#[derive(Clone)]
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<AuthData>, AppError> {
        tracing::debug!("Registering account for {}", request.username);

        let response = self
            .client
            .post(format!("{}/auth/register", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::transport(e.to_string()))?;

        read_envelope(response, REGISTRATION_FAILED).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse<AuthData>, AppError> {
        tracing::debug!("Logging in {}", request.email);

        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::transport(e.to_string()))?;

        read_envelope(response, LOGIN_FAILED).await
    }
}
