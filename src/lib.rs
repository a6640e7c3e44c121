// Library exports for testing and external use

pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use axum::{extract::FromRef, routing::get, Router};
use axum_extra::extract::cookie::Key;
use std::sync::Arc;
use tower_http::services::ServeDir;

use handlers::{auth, health, home, logout, quote_form, quotes};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<dyn services::quote_client::QuoteApi>,
    pub auth: Arc<dyn services::auth_client::AuthApi>,
    pub views: Arc<services::views::Views>,
    pub session: services::session_cookie::SessionCookie,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Every page, action and asset route, without middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        .route("/api/health", get(health::health_check))

        // Random quote landing page and its refresh fragment
        .route("/", get(home::home))
        .route("/fragments/random-quote", get(home::random_quote_fragment))

        // Quote management
        .route("/quotes", get(quotes::list_quotes).post(quotes::quotes_action))
        .route("/quotes/new", get(quote_form::new_quote_form).post(quote_form::create_quote))
        .route(
            "/quotes/:id/edit",
            get(quote_form::edit_quote_form).post(quote_form::update_quote),
        )

        // Authentication
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/register", get(auth::register_page).post(auth::register))
        .route("/auth/password-strength", axum::routing::post(auth::password_strength))
        .route("/logout", get(logout::logout_redirect).post(logout::logout))

        // Serve static files
        .nest_service("/static", ServeDir::new("static"))

        // Add shared state
        .with_state(state)
}
