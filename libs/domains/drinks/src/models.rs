//! Drink domain models

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Closed set of drink types accepted at the API boundary.
///
/// Clients submit these as lowercase strings; anything outside the set fails
/// validation before drink resolution is attempted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DrinkType {
    Beer,
    Wine,
    Cider,
    Champagne,
    Vodka,
    Whiskey,
    Gin,
    Rum,
    Tequila,
    Liqueur,
    Cocktail,
    Other,
}

/// A drink as stored in the `drinks` collection.
///
/// Identified by the `(type, name, percentage)` triple; the id is what
/// events reference.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Drink {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,

    #[serde(rename = "type")]
    pub drink_type: DrinkType,

    pub name: String,

    /// Alcohol by volume
    pub percentage: f64,
}

/// The client-supplied triple that identifies a drink.
#[derive(Debug, Clone, PartialEq)]
pub struct DrinkSpec {
    pub drink_type: DrinkType,
    pub name: String,
    pub percentage: f64,
}

impl DrinkSpec {
    pub fn new(drink_type: DrinkType, name: impl Into<String>, percentage: f64) -> Self {
        Self {
            drink_type,
            name: name.into(),
            percentage,
        }
    }
}
