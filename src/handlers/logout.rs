use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::SignedCookieJar;

use super::LOGIN_PATH;
use crate::AppState;

/// Clears the session cookie and returns to the login form.
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    tracing::info!("Signing out");
    (state.session.clear(jar), Redirect::to(LOGIN_PATH))
}

/// Nothing links here; the navigation posts to the action instead.
pub async fn logout_redirect() -> Redirect {
    Redirect::to("/")
}
