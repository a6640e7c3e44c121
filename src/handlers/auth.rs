use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use super::{LOGIN_PATH, QUOTES_PATH};
use crate::models::errors::{AppError, ErrorHandler};
use crate::models::quote::{LoginRequest, RegisterRequest};
use crate::services::auth_client::{LOGIN_FAILED, REGISTRATION_FAILED};
use crate::services::password_strength::{calculate_password_strength, PasswordStrength};
use crate::services::views::Nav;
use crate::AppState;

const REGISTER_PATH: &str = "/auth/register";
const NO_TOKEN: &str = "No token received from login.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordStrengthRequest {
    pub password: String,
}

pub async fn login_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let nav = Nav::new(state.session.token(&jar).is_some(), LOGIN_PATH);
    Ok(state.views.login(nav, "", None)?.into_response())
}

/// Posts credentials; a returned token becomes the session cookie.
///
/// On failure the form comes back with the service's message and the email
/// still filled in. No cookie is written.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let request = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    match state.auth.login(&request).await {
        Ok(envelope) => match non_empty_token(envelope.data.token) {
            Some(token) => {
                tracing::info!("Login succeeded for {}", request.email);
                Ok((state.session.store(jar, token), Redirect::to(QUOTES_PATH)).into_response())
            }
            None => {
                tracing::warn!("Login for {} returned no token", request.email);
                Ok(Redirect::to("/").into_response())
            }
        },
        Err(e) => {
            tracing::warn!("Login failed for {}: {}", request.email, e);
            let status = ErrorHandler::handle_error(&e).status;
            let message = ErrorHandler::action_message(&e, LOGIN_FAILED);
            let nav = Nav::new(state.session.token(&jar).is_some(), LOGIN_PATH);
            let page = state.views.login(nav, &request.email, Some(&message))?;
            Ok((status, page).into_response())
        }
    }
}

pub async fn register_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    let nav = Nav::new(state.session.token(&jar).is_some(), REGISTER_PATH);
    Ok(state.views.register(nav, "", "", None)?.into_response())
}

/// Creates the account and signs the visitor straight in.
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let request = RegisterRequest {
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password,
    };
    let nav = Nav::new(state.session.token(&jar).is_some(), REGISTER_PATH);

    let (status, message) = match state.auth.register(&request).await {
        Ok(envelope) => match non_empty_token(envelope.data.token) {
            Some(token) => {
                tracing::info!("Registered {}", request.username);
                return Ok((state.session.store(jar, token), Redirect::to(QUOTES_PATH)).into_response());
            }
            None => {
                tracing::warn!("Registration for {} returned no token", request.username);
                (StatusCode::BAD_GATEWAY, NO_TOKEN.to_string())
            }
        },
        Err(e) => {
            tracing::warn!("Registration failed for {}: {}", request.username, e);
            (
                ErrorHandler::handle_error(&e).status,
                ErrorHandler::action_message(&e, REGISTRATION_FAILED),
            )
        }
    };

    let page = state
        .views
        .register(nav, &request.username, &request.email, Some(&message))?;
    Ok((status, page).into_response())
}

/// Live strength meter for the register form. Advisory only.
pub async fn password_strength(Json(request): Json<PasswordStrengthRequest>) -> Json<PasswordStrength> {
    Json(calculate_password_strength(&request.password))
}

fn non_empty_token(token: Option<String>) -> Option<String> {
    token.filter(|token| !token.trim().is_empty())
}
