//! Event repository trait

use crate::error::Result;
use crate::models::{Event, PopulatedEvent};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Repository trait for event storage operations.
///
/// Every read and mutation is scoped to an owning user; no operation exists
/// that crosses user boundaries.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new event
    async fn create(&self, event: Event) -> Result<Event>;

    /// List a user's events, drink joined, most recent date first
    async fn list_for_user(&self, user: &ObjectId) -> Result<Vec<PopulatedEvent>>;

    /// Find one event matching both id and owner, drink joined
    async fn find_for_user(&self, id: &ObjectId, user: &ObjectId)
        -> Result<Option<PopulatedEvent>>;

    /// Atomically find-and-delete the event matching both id and owner,
    /// returning the deleted document
    async fn delete_for_user(&self, id: &ObjectId, user: &ObjectId) -> Result<Option<Event>>;
}
