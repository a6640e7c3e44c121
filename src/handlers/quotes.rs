use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use super::{redirect_to_login, remote_failure, QUOTES_PATH};
use crate::models::errors::AppError;
use crate::services::views::Nav;
use crate::utils::forms::non_blank;
use crate::AppState;

/// Submitted by the delete buttons on the list page
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuoteActionForm {
    pub intent: Option<String>,
    pub id: Option<String>,
}

/// All quotes. Anonymous visitors are sent to the login form.
pub async fn list_quotes(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let Some(token) = state.session.token(&jar) else {
        return Ok(redirect_to_login());
    };

    match state.quotes.list_quotes(Some(&token)).await {
        Ok(envelope) => {
            tracing::debug!("Listing {} quotes", envelope.data.len());
            let page = state.views.quote_list(Nav::new(true, QUOTES_PATH), &envelope.data)?;
            Ok(page.into_response())
        }
        Err(e) => remote_failure(&state, jar, QUOTES_PATH, e),
    }
}

pub async fn quotes_action(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<QuoteActionForm>,
) -> Result<Response, AppError> {
    let Some(token) = state.session.token(&jar) else {
        return Err(AppError::Unauthorized);
    };

    match form.intent.as_deref() {
        Some("delete") => {
            let id = non_blank(form.id.as_deref())
                .ok_or_else(|| AppError::validation_failed("Missing quote id"))?;

            match state.quotes.delete_quote(&id, Some(&token)).await {
                Ok(_) => {
                    tracing::info!("Deleted quote {}", id);
                    Ok(Redirect::to(QUOTES_PATH).into_response())
                }
                Err(e) => remote_failure(&state, jar, QUOTES_PATH, e),
            }
        }
        other => Err(AppError::validation_failed(format!(
            "Unsupported action: {}",
            other.unwrap_or("none")
        ))),
    }
}
