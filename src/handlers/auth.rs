use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Response, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::{verify_credential, MAX_PASSWORD_BYTES};
use crate::errors::{AppError, AppResult, RepositoryError};
use crate::models::{Credential, LoginForm, RegisterForm};
use crate::pages::Page;
use crate::state::AppState;

/// Shown for every failed login, whatever the cause.
pub const LOGIN_FAILED: &str = "Invalid username or password";

/// Status line passed between pages in the query string.
#[derive(Debug, Deserialize, Default)]
pub struct Notice {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl Notice {
    fn apply(self, page: Page) -> Page {
        page.text("error", self.error.unwrap_or_default())
            .text("message", self.message.unwrap_or_default())
    }
}

fn redirect_with(path: &str, key: &str, msg: &str) -> Response {
    Redirect::to(&format!("{}?{}={}", path, key, urlencoding::encode(msg))).into_response()
}

pub async fn serve_login_page(
    State(state): State<AppState>,
    Query(notice): Query<Notice>,
) -> AppResult<Response> {
    let page = notice.apply(Page::load(state.templates(), "login.html")?);
    Ok(Html(page.render()).into_response())
}

pub async fn serve_register_page(
    State(state): State<AppState>,
    Query(notice): Query<Notice>,
) -> AppResult<Response> {
    let page = notice.apply(Page::load(state.templates(), "register.html")?);
    Ok(Html(page.render()).into_response())
}

pub async fn handle_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    let verified =
        verify_credential(state.repo.as_ref(), &login_form.username, &login_form.password).await?;
    if !verified {
        tracing::info!("Login rejected for user: {}", login_form.username);
        return Err(AppError::Auth(LOGIN_FAILED.into()));
    }

    let cookie = state.auth.issue_session(&login_form.username)?;
    tracing::info!("Session issued for user: {}", login_form.username);
    Ok((jar.add(cookie), Redirect::to("/index/")).into_response())
}

pub async fn handle_register(
    State(state): State<AppState>,
    Form(register_form): Form<RegisterForm>,
) -> AppResult<Response> {
    if register_form.username.trim().is_empty() || register_form.password.is_empty() {
        return Ok(redirect_with("/register", "error", "Username and password are required"));
    }
    if register_form.password != register_form.confirm_password {
        return Ok(redirect_with("/register", "error", "Passwords don't match"));
    }
    if register_form.password.len() > MAX_PASSWORD_BYTES {
        let msg = format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES);
        return Ok(redirect_with("/register", "error", &msg));
    }

    let password_hash = state.auth.hash_password(&register_form.password).await?;
    let credential = Credential::new(register_form.username, password_hash);

    match state.repo.insert_credential(&credential).await {
        Ok(()) => {}
        Err(RepositoryError::Conflict(_)) => {
            return Ok(redirect_with("/register", "error", "Username already taken"));
        }
        Err(e) => {
            tracing::error!("Failed to save user {}: {}", credential.username, e);
            return Err(e.into());
        }
    }

    tracing::info!("Registered user: {}", credential.username);
    Ok(redirect_with("/login", "message", "Registration successful! Please log in"))
}

pub async fn handle_logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    (state.auth.clear_session(jar), Redirect::to("/index/")).into_response()
}
