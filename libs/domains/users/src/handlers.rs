//! HTTP handlers for accounts and sessions
//!
//! `auth_router` carries the public routes (register, login); the app wires
//! `account_router` (logout, whoami) behind the session guard.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_helpers::{
    extract_token_from_request, CurrentUser, SessionAuth, ValidatedJson, SESSION_COOKIE,
};
use tracing::instrument;

use crate::error::UserError;
use crate::models::{LoginRequest, RegisterRequest, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub sessions: SessionAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Public routes: register and login.
pub fn auth_router<R: UserRepository + 'static>() -> Router<AuthState<R>> {
    Router::new()
        .route("/auth/register", post(register::<R>))
        .route("/auth/login", post(login::<R>))
}

/// Session-guarded routes: logout and whoami. The app applies the guard
/// middleware when nesting this router.
pub fn account_router<R: UserRepository + 'static>() -> Router<AuthState<R>> {
    Router::new()
        .route("/auth/logout", post(logout::<R>))
        .route("/auth/me", get(me::<R>))
}

fn is_development() -> bool {
    std::env::var("APP_ENV")
        .map(|env| env == "development")
        .unwrap_or(cfg!(debug_assertions))
}

fn session_cookie(token: &str, max_age: u64) -> String {
    let secure_flag = if is_development() { "" } else { " Secure;" };
    format!(
        "{}={}; HttpOnly;{} SameSite=Strict; Path=/; Max-Age={}",
        SESSION_COOKIE, token, secure_flag, max_age
    )
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "The created account", body = UserResponse),
        (status = 400, description = "Invalid fields"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
#[instrument(skip(state, input), fields(email = %input.email))]
pub async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<Json<UserResponse>, UserError> {
    let user = state.service.register(input).await?;
    Ok(Json(user.into()))
}

/// Verify credentials and start a session
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = UserResponse),
        (status = 401, description = "Bad credentials")
    ),
    tag = "auth"
)]
#[instrument(skip(state, input), fields(email = %input.email))]
pub async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Response, UserError> {
    let user = state
        .service
        .authenticate(&input.email, &input.password)
        .await?;

    let token = state
        .sessions
        .create_session(&user.id.to_hex())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create session: {:?}", e);
            UserError::Internal("failed to create session".to_string())
        })?;

    let cookie = session_cookie(&token, state.sessions.ttl_seconds());

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(UserResponse::from(user)),
    )
        .into_response())
}

/// End the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session revoked; cookie cleared"),
        (status = 401, description = "No valid session")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn logout<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
) -> Result<Response, UserError> {
    if let Some(token) = extract_token_from_request(&headers) {
        state.sessions.revoke(&token).await.map_err(|e| {
            tracing::error!("Failed to revoke session: {:?}", e);
            UserError::Internal("failed to revoke session".to_string())
        })?;
    }

    let cookie = session_cookie("", 0);

    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
    )
        .into_response())
}

/// The current account
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "The current account", body = UserResponse),
        (status = 401, description = "No valid session")
    ),
    tag = "auth"
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn me<R: UserRepository>(
    State(state): State<AuthState<R>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserResponse>, UserError> {
    let user = state.service.get(&user.id).await?;
    Ok(Json(user.into()))
}
