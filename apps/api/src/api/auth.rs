use axum::{middleware, Router};
use axum_helpers::session_auth_middleware;
use domain_users::{account_router, auth_router, AuthState, MongoUserRepository, UserService};

/// Account routes: register/login are public, logout/me sit behind the
/// session guard.
pub fn router(state: &crate::state::AppState) -> Router {
    let auth_state = AuthState {
        service: UserService::new(MongoUserRepository::new(&state.db)),
        sessions: state.sessions.clone(),
    };

    let public = auth_router().with_state(auth_state.clone());
    let protected = account_router()
        .with_state(auth_state)
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            session_auth_middleware,
        ));

    public.merge(protected)
}
