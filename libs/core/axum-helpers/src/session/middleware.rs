use super::SessionAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "session_id";

/// The authenticated user for the current request.
///
/// Inserted into request extensions by [`session_auth_middleware`]; handlers
/// take it as an explicit `Extension<CurrentUser>` parameter instead of
/// reaching into ambient session state.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    /// The user's id, as stored in the session
    pub id: String,
}

/// Extract the session token from the `Authorization: Bearer` header or the
/// session cookie. Also used by logout to find the session to revoke.
pub fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let mut parts = cookie.trim().splitn(2, '=');
                        match (parts.next(), parts.next()) {
                            (Some(SESSION_COOKIE), Some(value)) if !value.is_empty() => {
                                Some(value.to_string())
                            }
                            _ => None,
                        }
                    })
                })
        })
}

/// Session authorization guard.
///
/// Resolves the request's session token against the session store and
/// inserts [`CurrentUser`] into request extensions on success. Requests
/// without a live session are rejected with `401 {"code":"unauthorized"}`
/// before any handler logic runs; a store failure is a 500.
pub async fn session_auth_middleware(
    State(auth): State<SessionAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match extract_token_from_request(request.headers()) {
        Some(t) => t,
        None => {
            tracing::debug!("No session token in Authorization header or cookie");
            return Err(AppError::Unauthorized);
        }
    };

    match auth.resolve(&token).await {
        Ok(Some(user_id)) => {
            request.extensions_mut().insert(CurrentUser { id: user_id });
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Unknown or expired session token");
            Err(AppError::Unauthorized)
        }
        Err(e) => {
            tracing::error!("Session store error: {:?}", e);
            Err(AppError::Internal("session store unavailable".to_string()))
        }
    }
}
