#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    response::IntoResponse,
    Router,
};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use serde_json::Value;
use std::sync::{Arc, Mutex};

// Re-export the main app modules for testing
use quote_board::models::errors::AppError;
use quote_board::models::quote::{
    ApiResponse, AuthData, LoginRequest, NewQuote, Quote, QuoteUpdate, RegisterRequest,
};
use quote_board::services::auth_client::AuthApi;
use quote_board::services::quote_client::QuoteApi;
use quote_board::services::session_cookie::SessionCookie;
use quote_board::services::views::Views;
use quote_board::{build_router, AppState};

/// One call seen by [`StubQuoteApi`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub id: Option<String>,
    pub token: Option<String>,
    pub body: Option<Value>,
}

/// How the stub quote service answers every call
#[derive(Debug, Clone)]
pub enum Outcome {
    Succeed,
    Remote(u16, &'static str),
    Transport,
}

pub struct StubQuoteApi {
    pub quotes: Vec<Quote>,
    pub outcome: Outcome,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl StubQuoteApi {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            outcome: Outcome::Succeed,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(outcome: Outcome) -> Self {
        Self {
            quotes: vec![sample_quote()],
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, id: Option<&str>, token: Option<&str>, body: Option<Value>) {
        self.calls.lock().unwrap().push(RecordedCall {
            operation,
            id: id.map(str::to_string),
            token: token.map(str::to_string),
            body,
        });
    }

    fn check(&self) -> Result<(), AppError> {
        match &self.outcome {
            Outcome::Succeed => Ok(()),
            Outcome::Remote(status, message) => Err(AppError::remote(*status, *message)),
            Outcome::Transport => Err(AppError::transport("connection refused")),
        }
    }

    fn envelope<T>(data: T) -> ApiResponse<T> {
        ApiResponse {
            status_code: 200,
            message: "ok".to_string(),
            data,
        }
    }

    fn find(&self, id: &str) -> Result<Quote, AppError> {
        self.quotes
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| AppError::remote(404, "Quote not found"))
    }
}

#[async_trait]
impl QuoteApi for StubQuoteApi {
    async fn list_quotes(&self, token: Option<&str>) -> Result<ApiResponse<Vec<Quote>>, AppError> {
        self.record("list", None, token, None);
        self.check()?;
        Ok(Self::envelope(self.quotes.clone()))
    }

    async fn random_quote(&self) -> Result<ApiResponse<Quote>, AppError> {
        self.record("random", None, None, None);
        self.check()?;
        self.quotes
            .first()
            .cloned()
            .map(Self::envelope)
            .ok_or_else(|| AppError::remote(404, "No quotes"))
    }

    async fn get_quote(&self, id: &str) -> Result<ApiResponse<Quote>, AppError> {
        self.record("get", Some(id), None, None);
        self.check()?;
        self.find(id).map(Self::envelope)
    }

    async fn create_quote(
        &self,
        quote: &NewQuote,
        token: Option<&str>,
    ) -> Result<ApiResponse<Quote>, AppError> {
        self.record("create", None, token, serde_json::to_value(quote).ok());
        self.check()?;
        Ok(Self::envelope(Quote {
            id: "created".to_string(),
            text: quote.text.clone(),
            author: quote.author.clone(),
            tags: quote.tags.clone(),
        }))
    }

    async fn update_quote(
        &self,
        id: &str,
        update: &QuoteUpdate,
        token: Option<&str>,
    ) -> Result<ApiResponse<Quote>, AppError> {
        self.record("update", Some(id), token, serde_json::to_value(update).ok());
        self.check()?;
        self.find(id).map(Self::envelope)
    }

    async fn delete_quote(
        &self,
        id: &str,
        token: Option<&str>,
    ) -> Result<ApiResponse<Option<Value>>, AppError> {
        self.record("delete", Some(id), token, None);
        self.check()?;
        Ok(Self::envelope(None))
    }
}

/// How the stub auth service answers
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Token(&'static str),
    NoToken,
    Reject(u16, &'static str),
}

pub struct StubAuthApi {
    pub outcome: AuthOutcome,
    pub calls: Mutex<Vec<Value>>,
}

impl StubAuthApi {
    pub fn new(outcome: AuthOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<ApiResponse<AuthData>, AppError> {
        let token = match &self.outcome {
            AuthOutcome::Token(token) => Some(token.to_string()),
            AuthOutcome::NoToken => None,
            AuthOutcome::Reject(status, message) => return Err(AppError::remote(*status, *message)),
        };
        Ok(ApiResponse {
            status_code: 200,
            message: "ok".to_string(),
            data: AuthData { token },
        })
    }
}

#[async_trait]
impl AuthApi for StubAuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<AuthData>, AppError> {
        self.calls.lock().unwrap().push(serde_json::to_value(request).unwrap());
        self.answer()
    }

    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse<AuthData>, AppError> {
        self.calls.lock().unwrap().push(serde_json::to_value(request).unwrap());
        self.answer()
    }
}

pub fn sample_quote() -> Quote {
    Quote {
        id: "1".to_string(),
        text: "Be kind.".to_string(),
        author: "Anon".to_string(),
        tags: vec!["kindness".to_string()],
    }
}

pub fn test_key() -> Key {
    Key::from(&[7u8; 64][..])
}

/// Setup a test application backed by the given stubs
pub fn setup_test_app(quotes: Arc<StubQuoteApi>, auth: Arc<StubAuthApi>) -> Router {
    let app_state = AppState {
        quotes,
        auth,
        views: Arc::new(Views::new().expect("templates compile")),
        session: SessionCookie::new(false),
        cookie_key: test_key(),
    };

    build_router(app_state)
}

/// `auth_token=<signed value>` as a browser would send it back
pub fn session_cookie_header(token: &str) -> String {
    let jar = SessionCookie::new(false).store(SignedCookieJar::new(test_key()), token);
    let response = jar.into_response();
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    set_cookie.split(';').next().unwrap().to_string()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn set_cookies<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub fn location<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
}
