use axum::{middleware, Router};
use axum_helpers::session_auth_middleware;
use domain_drinks::MongoDrinkRepository;
use domain_events::{events_router, EventService};
use std::sync::Arc;

/// Event routes over the MongoDB repositories, behind the session guard.
pub fn router(state: &crate::state::AppState) -> Router {
    let events = domain_events::MongoEventRepository::new(&state.db);
    let drinks = MongoDrinkRepository::new(&state.db);
    let service = Arc::new(EventService::new(events, drinks));

    events_router()
        .with_state(service)
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            session_auth_middleware,
        ))
}
