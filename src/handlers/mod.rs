// Loader/action pairs for every route. Session state is re-read from the
// signed cookie on each request and passed down explicitly.

pub mod auth;
pub mod health;
pub mod home;
pub mod logout;
pub mod quote_form;
pub mod quotes;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::models::errors::{AppError, ErrorHandler};
use crate::services::views::Nav;
use crate::AppState;

pub const LOGIN_PATH: &str = "/auth/login";
pub const QUOTES_PATH: &str = "/quotes";

/// Redirect for protected loaders reached without a session.
pub(crate) fn redirect_to_login() -> Response {
    Redirect::to(LOGIN_PATH).into_response()
}

/// Turns a failed remote call into a page.
///
/// A 401 ends the session: the cookie is cleared and the visitor is sent to
/// the login form. Anything else renders the error page with the status from
/// [`ErrorHandler`].
pub(crate) fn remote_failure(
    state: &AppState,
    jar: SignedCookieJar,
    current_path: &str,
    error: AppError,
) -> Result<Response, AppError> {
    if error.is_unauthorized() {
        tracing::info!("Session rejected by the quote service, signing out");
        return Ok((state.session.clear(jar), Redirect::to(LOGIN_PATH)).into_response());
    }

    tracing::warn!("Request for {} failed: {}", current_path, error);
    let rendered = ErrorHandler::handle_error(&error);
    let authenticated = state.session.token(&jar).is_some();
    let page = state.views.error_page(
        Nav::new(authenticated, current_path),
        &rendered.message,
        QUOTES_PATH,
        "Back to quotes",
    )?;
    Ok((rendered.status, page).into_response())
}
