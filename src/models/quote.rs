use serde::{Deserialize, Serialize};

/// A quote as stored by the remote quote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body for creating a quote; the service assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewQuote {
    pub text: String,
    pub author: String,
    pub tags: Vec<String>,
}

/// Partial update body; absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl From<NewQuote> for QuoteUpdate {
    fn from(quote: NewQuote) -> Self {
        Self {
            text: Some(quote.text),
            author: Some(quote.author),
            tags: Some(quote.tags),
        }
    }
}

/// Uniform `{statusCode, message, data}` wrapper returned by every remote call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Failure body; only the message is used and it may be missing entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of a successful login or registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthData {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
