use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect};
use axum::Form;
use serde::Deserialize;

use super::AppState;
use crate::auth::session;
use crate::error::{AppError, Result};
use crate::views;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse> {
    if !state.credentials.verify(&form.username, &form.password)? {
        tracing::info!(user = %form.username, "failed login attempt");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.sessions.issue(&form.username);
    tracing::info!(user = %form.username, "login");
    Ok((
        [(SET_COOKIE, session::session_cookie(&token))],
        Redirect::to("/dashboard"),
    ))
}

pub async fn signup_form() -> Html<String> {
    views::signup_page()
}

#[derive(Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Create the account record and store the password hash. Username
/// uniqueness is enforced by the account document; an existing record
/// is left untouched.
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    if form.password != form.confirm_password {
        return Err(AppError::PasswordMismatch);
    }

    state.store.create_account(&form.username).await?;
    state.credentials.set_password(&form.username, &form.password)?;

    tracing::info!(user = %form.username, "account created");
    Ok(Redirect::to("/"))
}

pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, session::clear_session_cookie())],
        Redirect::to("/"),
    )
}
