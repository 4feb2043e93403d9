//! Event domain models

use crate::de;
use chrono::{DateTime, Utc};
use domain_drinks::Drink;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Closed set of health tags.
///
/// Free-text values are never persisted; a request carrying anything outside
/// this set fails validation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthTag {
    Fresh,
    Fine,
    Tipsy,
    Hungover,
    Sick,
}

/// An event as stored in the `events` collection.
///
/// `user` is immutable after creation and always comes from the session.
/// `cost` and `health` are omitted from the document entirely when absent,
/// never stored as null placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user: ObjectId,

    pub drink: ObjectId,

    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<i32>,

    pub volume: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthTag>,
}

/// An event joined with its drink document, as produced by the `$lookup`
/// read pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct PopulatedEvent {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user: ObjectId,

    pub drink: Drink,

    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub cost: Option<i32>,

    pub volume: i32,

    #[serde(default)]
    pub health: Option<HealthTag>,
}

/// Body of `POST /events`.
///
/// The numeric fields accept both JSON numbers and numeric strings, coerced
/// to integers the way a form-driven client submits them. Presence checks
/// and the closed-enum checks happen in the service's validation sequence,
/// not at deserialization, so every failure answers with the same coarse
/// wire code.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub drink_type: Option<String>,

    #[serde(default)]
    pub drink_name: Option<String>,

    #[serde(default)]
    pub percentage: Option<f64>,

    /// Accepted as-is: RFC 3339, naive datetime, bare date, or epoch millis
    #[serde(default, deserialize_with = "de::opt_lenient_datetime")]
    #[schema(value_type = Option<String>)]
    pub date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "de::opt_coerced_int")]
    #[schema(value_type = Option<i64>)]
    pub cost: Option<i32>,

    #[serde(default, deserialize_with = "de::opt_coerced_int")]
    #[schema(value_type = Option<i64>)]
    pub volume: Option<i32>,

    #[serde(default)]
    pub health: Option<String>,
}

/// Wire representation of an event with the drink as a bare id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    #[serde(rename = "_id")]
    pub id: String,

    pub user: String,

    pub drink: String,

    pub date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<i32>,

    pub volume: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthTag>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.to_hex(),
            user: event.user.to_hex(),
            drink: event.drink.to_hex(),
            date: event.date,
            cost: event.cost,
            volume: event.volume,
            health: event.health,
        }
    }
}

/// Wire representation of an event with the drink populated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PopulatedEventResponse {
    #[serde(rename = "_id")]
    pub id: String,

    pub user: String,

    pub drink: DrinkBody,

    pub date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<i32>,

    pub volume: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthTag>,
}

/// Wire representation of the joined drink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinkBody {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "type")]
    pub drink_type: domain_drinks::DrinkType,

    pub name: String,

    pub percentage: f64,
}

impl From<Drink> for DrinkBody {
    fn from(drink: Drink) -> Self {
        Self {
            id: drink.id.to_hex(),
            drink_type: drink.drink_type,
            name: drink.name,
            percentage: drink.percentage,
        }
    }
}

impl From<PopulatedEvent> for PopulatedEventResponse {
    fn from(event: PopulatedEvent) -> Self {
        Self {
            id: event.id.to_hex(),
            user: event.user.to_hex(),
            drink: event.drink.into(),
            date: event.date,
            cost: event.cost,
            volume: event.volume,
            health: event.health,
        }
    }
}
