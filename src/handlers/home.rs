use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::models::errors::AppError;
use crate::services::views::Nav;
use crate::AppState;

const FETCH_FAILED: &str = "Failed to fetch quote";

/// Landing page with one random quote. Needs no session.
pub async fn home(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let nav = Nav::new(state.session.token(&jar).is_some(), "/");

    let page = match state.quotes.random_quote().await {
        Ok(envelope) => state.views.home(nav, Some(&envelope.data), None)?,
        Err(e) => {
            tracing::warn!("Failed to load random quote: {}", e);
            state.views.home(nav, None, Some(FETCH_FAILED))?
        }
    };

    Ok(page.into_response())
}

/// Quote card markup for the "Get New Quote" button.
pub async fn random_quote_fragment(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.quotes.random_quote().await {
        Ok(envelope) => Ok(state.views.quote_card(Some(&envelope.data), None)?.into_response()),
        Err(e) => {
            tracing::warn!("Failed to refresh random quote: {}", e);
            let card = state.views.quote_card(None, Some(FETCH_FAILED))?;
            Ok((StatusCode::BAD_GATEWAY, card).into_response())
        }
    }
}
