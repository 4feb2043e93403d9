//! HTTP handlers for the events API
//!
//! Every route here sits behind the session guard; handlers receive the
//! authenticated user as an explicit `Extension<CurrentUser>` and pass its
//! id down to the service. All successes answer 200 with the event body,
//! matching the original contract (no 201/204 variants).

use crate::error::EventError;
use crate::models::{CreateEventRequest, EventResponse, PopulatedEventResponse};
use crate::repository::EventRepository;
use crate::service::EventService;
use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Extension, Json, Router};
use axum_helpers::{CurrentUser, ValidatedJson};
use domain_drinks::DrinkRepository;
use std::sync::Arc;
use tracing::instrument;

/// Events router state
pub type EventsState<R, D> = Arc<EventService<R, D>>;

/// Create the events router.
///
/// The odd pairing of `/events/{id}` for delete but `/event/{id}` for get is
/// part of the published contract and kept as-is.
pub fn events_router<R, D>() -> Router<EventsState<R, D>>
where
    R: EventRepository + 'static,
    D: DrinkRepository + 'static,
{
    Router::new()
        .route(
            "/events",
            get(list_events::<R, D>).post(create_event::<R, D>),
        )
        .route("/events/{event_id}", delete(delete_event::<R, D>))
        .route("/event/{event_id}", get(get_event::<R, D>))
}

/// List the current user's events, drink populated, newest first
#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "The user's events, most recent date first", body = Vec<PopulatedEventResponse>),
        (status = 401, description = "No valid session"),
        (status = 500, description = "Store error")
    ),
    tag = "events"
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_events<R: EventRepository, D: DrinkRepository>(
    State(state): State<EventsState<R, D>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<PopulatedEventResponse>>, EventError> {
    let events = state.list(&user.id).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// Get one of the current user's events by id
#[utoipa::path(
    get,
    path = "/event/{event_id}",
    params(
        ("event_id" = String, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "The event, drink populated", body = PopulatedEventResponse),
        (status = 400, description = "Unknown id or not owned by the user"),
        (status = 401, description = "No valid session"),
        (status = 500, description = "Store error")
    ),
    tag = "events"
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_event<R: EventRepository, D: DrinkRepository>(
    State(state): State<EventsState<R, D>>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<String>,
) -> Result<Json<PopulatedEventResponse>, EventError> {
    let event = state.get(&user.id, &event_id).await?;
    Ok(Json(event.into()))
}

/// Create an event for the current user
#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "The created event, drink as id", body = EventResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "No valid session"),
        (status = 500, description = "Store error")
    ),
    tag = "events"
)]
#[instrument(skip(state, user, request), fields(user_id = %user.id))]
pub async fn create_event<R: EventRepository, D: DrinkRepository>(
    State(state): State<EventsState<R, D>>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> Result<Json<EventResponse>, EventError> {
    let event = state.create(&user.id, request).await?;
    Ok(Json(event.into()))
}

/// Delete one of the current user's events by id
#[utoipa::path(
    delete,
    path = "/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "The deleted event", body = EventResponse),
        (status = 400, description = "Unknown id or not owned by the user"),
        (status = 401, description = "No valid session"),
        (status = 500, description = "Store error")
    ),
    tag = "events"
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_event<R: EventRepository, D: DrinkRepository>(
    State(state): State<EventsState<R, D>>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<String>,
) -> Result<Json<EventResponse>, EventError> {
    let event = state.delete(&user.id, &event_id).await?;
    Ok(Json(event.into()))
}
