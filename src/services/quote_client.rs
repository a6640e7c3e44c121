use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::errors::AppError;
use crate::models::quote::{ApiResponse, ErrorEnvelope, NewQuote, Quote, QuoteUpdate};

/// Operations offered by the remote quote service.
///
/// Every call is a single round trip: no retries, no caching. A `token`, when
/// given, is forwarded as `Authorization: Bearer <token>`.
#[async_trait]
pub trait QuoteApi: Send + Sync {
    async fn list_quotes(&self, token: Option<&str>) -> Result<ApiResponse<Vec<Quote>>, AppError>;

    async fn random_quote(&self) -> Result<ApiResponse<Quote>, AppError>;

    async fn get_quote(&self, id: &str) -> Result<ApiResponse<Quote>, AppError>;

    async fn create_quote(
        &self,
        quote: &NewQuote,
        token: Option<&str>,
    ) -> Result<ApiResponse<Quote>, AppError>;

    async fn update_quote(
        &self,
        id: &str,
        update: &QuoteUpdate,
        token: Option<&str>,
    ) -> Result<ApiResponse<Quote>, AppError>;

    async fn delete_quote(
        &self,
        id: &str,
        token: Option<&str>,
    ) -> Result<ApiResponse<Option<Value>>, AppError>;
}

/// reqwest-backed client for the quote endpoints.
#[derive(Clone)]
pub struct HttpQuoteClient {
    client: Client,
    base_url: String,
}

impl HttpQuoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn quote_url(&self, id: &str) -> String {
        self.url(&format!("/quotes/{}", urlencoding::encode(id)))
    }
}

#[async_trait]
impl QuoteApi for HttpQuoteClient {
    async fn list_quotes(&self, token: Option<&str>) -> Result<ApiResponse<Vec<Quote>>, AppError> {
        let request = with_bearer(self.client.get(self.url("/quotes")), token);
        send(request, "GET /quotes").await
    }

    async fn random_quote(&self) -> Result<ApiResponse<Quote>, AppError> {
        send(self.client.get(self.url("/quotes/random")), "GET /quotes/random").await
    }

    async fn get_quote(&self, id: &str) -> Result<ApiResponse<Quote>, AppError> {
        send(self.client.get(self.quote_url(id)), "GET /quotes/{id}").await
    }

    async fn create_quote(
        &self,
        quote: &NewQuote,
        token: Option<&str>,
    ) -> Result<ApiResponse<Quote>, AppError> {
        let request = with_bearer(self.client.post(self.url("/quotes")).json(quote), token);
        send(request, "POST /quotes").await
    }

    async fn update_quote(
        &self,
        id: &str,
        update: &QuoteUpdate,
        token: Option<&str>,
    ) -> Result<ApiResponse<Quote>, AppError> {
        let request = with_bearer(self.client.put(self.quote_url(id)).json(update), token);
        send(request, "PUT /quotes/{id}").await
    }

    async fn delete_quote(
        &self,
        id: &str,
        token: Option<&str>,
    ) -> Result<ApiResponse<Option<Value>>, AppError> {
        let request = with_bearer(self.client.delete(self.quote_url(id)), token);
        send(request, "DELETE /quotes/{id}").await
    }
}

pub(crate) fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

async fn send<T: DeserializeOwned>(
    request: RequestBuilder,
    operation: &str,
) -> Result<ApiResponse<T>, AppError> {
    tracing::debug!("Calling quote service: {}", operation);

    let response = request.send().await.map_err(|e| {
        tracing::warn!("{} failed: {}", operation, e);
        AppError::transport(e.to_string())
    })?;

    read_envelope(response, "").await
}

/// Reads an envelope, turning non-2xx statuses into [`AppError::RemoteError`].
///
/// The error message comes from the envelope when the body has one, else
/// `fallback`. A success body that is not a valid envelope is a parse failure.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<ApiResponse<T>, AppError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        tracing::warn!("Remote service returned {}: {}", status, message);
        return Err(AppError::remote(status.as_u16(), message));
    }

    serde_json::from_slice(&body).map_err(|e| AppError::parse_failed(e.to_string()))
}
