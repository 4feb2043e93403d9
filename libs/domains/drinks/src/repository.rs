//! Drink repository trait

use crate::error::Result;
use crate::models::{Drink, DrinkSpec};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Repository trait for drink storage and resolution
#[async_trait]
pub trait DrinkRepository: Send + Sync {
    /// Return the id of the drink matching the spec, creating the record
    /// when no match exists.
    async fn resolve(&self, spec: &DrinkSpec) -> Result<ObjectId>;

    /// Get a drink by id
    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<Drink>>;
}
