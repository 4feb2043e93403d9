//! MongoDB implementation of EventRepository

use crate::error::Result;
use crate::models::{Event, PopulatedEvent};
use crate::repository::EventRepository;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, from_document, oid::ObjectId, Document};
use mongodb::{Collection, Database};
use tracing::instrument;

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<Event>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("events"),
        }
    }

    /// Create indexes for the ownership-scoped read paths.
    pub async fn create_indexes(&self) -> Result<()> {
        use mongodb::IndexModel;

        let indexes = vec![
            // Every query filters by user; lists sort by date descending
            IndexModel::builder()
                .keys(doc! { "user": 1, "date": -1 })
                .build(),
            IndexModel::builder().keys(doc! { "drink": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// The read pipeline: match, newest first, join the drink document.
    ///
    /// `$lookup` + `$unwind` is the aggregation analog of a populated
    /// reference; `$unwind` also drops any event whose drink is dangling
    /// rather than returning a half-joined document.
    fn populate_pipeline(filter: Document) -> Vec<Document> {
        vec![
            doc! { "$match": filter },
            doc! { "$sort": { "date": -1 } },
            doc! { "$lookup": {
                "from": "drinks",
                "localField": "drink",
                "foreignField": "_id",
                "as": "drink",
            }},
            doc! { "$unwind": "$drink" },
        ]
    }

    async fn run_populated(&self, filter: Document) -> Result<Vec<PopulatedEvent>> {
        let cursor = self
            .collection
            .aggregate(Self::populate_pipeline(filter))
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(|d| from_document::<PopulatedEvent>(d).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id, user = %event.user))]
    async fn create(&self, event: Event) -> Result<Event> {
        self.collection.insert_one(&event).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user: &ObjectId) -> Result<Vec<PopulatedEvent>> {
        self.run_populated(doc! { "user": user }).await
    }

    #[instrument(skip(self))]
    async fn find_for_user(
        &self,
        id: &ObjectId,
        user: &ObjectId,
    ) -> Result<Option<PopulatedEvent>> {
        let mut events = self.run_populated(doc! { "_id": id, "user": user }).await?;
        Ok(events.pop())
    }

    #[instrument(skip(self))]
    async fn delete_for_user(&self, id: &ObjectId, user: &ObjectId) -> Result<Option<Event>> {
        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": id, "user": user })
            .await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthTag;
    use chrono::Utc;
    use domain_drinks::{DrinkRepository, DrinkSpec, DrinkType, MongoDrinkRepository};

    async fn test_database() -> Database {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&url).await.unwrap();
        client.database("pourlog_test")
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn create_list_and_delete_scoped_to_user() {
        let db = test_database().await;
        let drinks = MongoDrinkRepository::new(&db);
        let repo = MongoEventRepository::new(&db);

        let owner = ObjectId::new();
        let stranger = ObjectId::new();
        let drink = drinks
            .resolve(&DrinkSpec::new(DrinkType::Beer, "Scoped IPA", 6.0))
            .await
            .unwrap();

        let event = Event {
            id: ObjectId::new(),
            user: owner,
            drink,
            date: Utc::now(),
            cost: None,
            volume: 330,
            health: Some(HealthTag::Fine),
        };
        let event = repo.create(event).await.unwrap();

        // Owner sees the event with the drink populated
        let listed = repo.list_for_user(&owner).await.unwrap();
        assert!(listed.iter().any(|e| e.id == event.id));
        assert!(listed.iter().all(|e| e.user == owner));

        // Another user sees nothing, and cannot delete it
        assert!(repo.find_for_user(&event.id, &stranger).await.unwrap().is_none());
        assert!(repo
            .delete_for_user(&event.id, &stranger)
            .await
            .unwrap()
            .is_none());

        // The owner can; a second delete finds nothing
        let deleted = repo.delete_for_user(&event.id, &owner).await.unwrap();
        assert_eq!(deleted.unwrap().id, event.id);
        assert!(repo
            .delete_for_user(&event.id, &owner)
            .await
            .unwrap()
            .is_none());
    }
}
