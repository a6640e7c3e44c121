use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use super::{redirect_to_login, remote_failure, QUOTES_PATH};
use crate::models::errors::{AppError, ErrorHandler};
use crate::models::quote::{NewQuote, QuoteUpdate};
use crate::services::views::{Nav, QuoteFormValues, QuoteFormView};
use crate::utils::forms::{non_blank, split_tags};
use crate::AppState;

const SAVE_FAILED: &str = "Failed to save quote";

/// Fields posted by the shared create/edit form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuoteForm {
    pub text: String,
    pub author: String,
    /// Comma-separated tag list
    pub tags: String,
}

impl QuoteForm {
    /// Echo of the submitted values for re-rendering the form
    pub fn values(&self) -> QuoteFormValues {
        QuoteFormValues {
            text: self.text.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Trimmed quote ready for the remote service
    pub fn to_new_quote(&self) -> Result<NewQuote, AppError> {
        let text = non_blank(Some(self.text.as_str()))
            .ok_or_else(|| AppError::validation_failed("Quote text is required"))?;
        let author = non_blank(Some(self.author.as_str()))
            .ok_or_else(|| AppError::validation_failed("Author is required"))?;

        Ok(NewQuote {
            text,
            author,
            tags: split_tags(&self.tags),
        })
    }
}

/// Form action for `id`, re-encoded so opaque ids stay one path segment.
fn edit_path(id: &str) -> String {
    format!("/quotes/{}/edit", urlencoding::encode(id))
}

pub async fn new_quote_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    if state.session.token(&jar).is_none() {
        return Ok(redirect_to_login());
    }

    let view = QuoteFormView::create(QuoteFormValues::default(), None);
    let page = state.views.quote_form(Nav::new(true, "/quotes/new"), &view)?;
    Ok(page.into_response())
}

pub async fn create_quote(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<QuoteForm>,
) -> Result<Response, AppError> {
    let Some(token) = state.session.token(&jar) else {
        return Err(AppError::Unauthorized);
    };

    let nav = Nav::new(true, "/quotes/new");
    let quote = match form.to_new_quote() {
        Ok(quote) => quote,
        Err(e) => {
            let message = ErrorHandler::action_message(&e, SAVE_FAILED);
            let view = QuoteFormView::create(form.values(), Some(message));
            let page = state.views.quote_form(nav, &view)?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match state.quotes.create_quote(&quote, Some(&token)).await {
        Ok(envelope) => {
            tracing::info!("Created quote {}", envelope.data.id);
            Ok(Redirect::to(QUOTES_PATH).into_response())
        }
        Err(e) if e.is_unauthorized() => remote_failure(&state, jar, "/quotes/new", e),
        Err(e) => {
            tracing::warn!("Failed to create quote: {}", e);
            let status = ErrorHandler::handle_error(&e).status;
            let message = ErrorHandler::action_message(&e, SAVE_FAILED);
            let view = QuoteFormView::create(form.values(), Some(message));
            let page = state.views.quote_form(nav, &view)?;
            Ok((status, page).into_response())
        }
    }
}

/// Edit form pre-filled from the stored quote.
pub async fn edit_quote_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let path = edit_path(&id);
    let authenticated = state.session.token(&jar).is_some();

    match state.quotes.get_quote(&id).await {
        Ok(envelope) => {
            let view = QuoteFormView::edit(path.clone(), QuoteFormValues::from(&envelope.data), None);
            let page = state.views.quote_form(Nav::new(authenticated, &path), &view)?;
            Ok(page.into_response())
        }
        Err(e) => remote_failure(&state, jar, &path, e),
    }
}

pub async fn update_quote(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<String>,
    Form(form): Form<QuoteForm>,
) -> Result<Response, AppError> {
    let Some(token) = state.session.token(&jar) else {
        return Err(AppError::Unauthorized);
    };

    let path = edit_path(&id);
    let nav = Nav::new(true, &path);
    let update = match form.to_new_quote() {
        Ok(quote) => QuoteUpdate::from(quote),
        Err(e) => {
            let message = ErrorHandler::action_message(&e, SAVE_FAILED);
            let view = QuoteFormView::edit(path.clone(), form.values(), Some(message));
            let page = state.views.quote_form(nav, &view)?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match state.quotes.update_quote(&id, &update, Some(&token)).await {
        Ok(_) => {
            tracing::info!("Updated quote {}", id);
            Ok(Redirect::to(QUOTES_PATH).into_response())
        }
        Err(e) if e.is_unauthorized() => remote_failure(&state, jar, &path, e),
        Err(e) => {
            tracing::warn!("Failed to update quote {}: {}", id, e);
            let status = ErrorHandler::handle_error(&e).status;
            let message = ErrorHandler::action_message(&e, SAVE_FAILED);
            let view = QuoteFormView::edit(path.clone(), form.values(), Some(message));
            let page = state.views.quote_form(nav, &view)?;
            Ok((status, page).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(text: &str, author: &str, tags: &str) -> QuoteForm {
        QuoteForm {
            text: text.to_string(),
            author: author.to_string(),
            tags: tags.to_string(),
        }
    }

    #[test]
    fn test_submission_trims_and_splits_tags() {
        let quote = form("  Be kind. ", " Anon ", "a, ,b,,c ").to_new_quote().unwrap();
        assert_eq!(quote.text, "Be kind.");
        assert_eq!(quote.author, "Anon");
        assert_eq!(quote.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let err = form("   ", "Anon", "").to_new_quote().unwrap_err();
        assert_eq!(ErrorHandler::action_message(&err, SAVE_FAILED), "Quote text is required");

        let err = form("Be kind.", "", "").to_new_quote().unwrap_err();
        assert_eq!(ErrorHandler::action_message(&err, SAVE_FAILED), "Author is required");
    }

    #[test]
    fn test_edit_path_encodes_id() {
        assert_eq!(edit_path("65f1c0"), "/quotes/65f1c0/edit");
        assert_eq!(edit_path("a/b?c#d"), "/quotes/a%2Fb%3Fc%23d/edit");
    }

    #[test]
    fn test_values_echo_raw_input() {
        let values = form("Be kind.", "Anon", "x,, y").values();
        assert_eq!(values.tags, "x,, y");
    }
}
