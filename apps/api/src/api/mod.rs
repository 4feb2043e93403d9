use axum::Router;

pub mod auth;
pub mod events;
pub mod health;

/// All API routes, with state applied per domain router.
///
/// Routes keep their published paths (no prefix); the session guard wraps
/// the event routes and the protected account routes.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .merge(events::router(state))
        .merge(auth::router(state))
}

/// Router with the /ready endpoint performing real store checks.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
