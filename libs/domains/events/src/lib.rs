//! Events Domain
//!
//! Ownership-scoped CRUD for personal drinking events:
//! - every query and mutation is filtered by the owning user, taken from the
//!   authenticated session and never from client input
//! - reads join the referenced drink (aggregation `$lookup`); the create
//!   response carries the drink as a bare id
//! - validation is synchronous and fail-fast, answered with the API's coarse
//!   `invalid income data` code so responses never reveal whether a missed
//!   lookup was a bad id or another user's event
//!
//! ```text
//! HTTP request -> session guard -> handler -> EventService
//!                                                 |-> DrinkRepository (create only)
//!                                                 `-> EventRepository (MongoDB)
//! ```

use utoipa::OpenApi;

mod de;
mod error;
pub mod handlers;
mod models;
mod mongodb;
mod repository;
mod service;

pub use error::{EventError, Result};
pub use handlers::{events_router, EventsState};
pub use models::{
    CreateEventRequest, DrinkBody, Event, EventResponse, HealthTag, PopulatedEvent,
    PopulatedEventResponse,
};
pub use mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::EventService;

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_events,
        handlers::get_event,
        handlers::create_event,
        handlers::delete_event,
    ),
    components(schemas(
        CreateEventRequest,
        DrinkBody,
        EventResponse,
        PopulatedEventResponse,
        HealthTag,
        domain_drinks::DrinkType,
    )),
    tags(
        (name = "events", description = "Ownership-scoped drinking event tracking")
    )
)]
pub struct ApiDoc;
