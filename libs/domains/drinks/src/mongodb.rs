//! MongoDB implementation of DrinkRepository

use crate::error::{DrinkError, Result};
use crate::models::{Drink, DrinkSpec};
use crate::repository::DrinkRepository;
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Collection, Database};
use tracing::instrument;

/// MongoDB-based drink repository
#[derive(Clone)]
pub struct MongoDrinkRepository {
    collection: Collection<Drink>,
}

impl MongoDrinkRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("drinks"),
        }
    }

    /// Create the unique index backing get-or-create resolution.
    pub async fn create_indexes(&self) -> Result<()> {
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let index = IndexModel::builder()
            .keys(doc! { "type": 1, "name": 1, "percentage": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl DrinkRepository for MongoDrinkRepository {
    /// Atomic get-or-create: a single upsert returns the existing document
    /// or inserts the triple, so concurrent resolutions of the same drink
    /// converge on one record.
    #[instrument(skip(self, spec), fields(drink_type = %spec.drink_type, name = %spec.name))]
    async fn resolve(&self, spec: &DrinkSpec) -> Result<ObjectId> {
        let filter = doc! {
            "type": spec.drink_type.to_string(),
            "name": &spec.name,
            "percentage": spec.percentage,
        };
        let update = doc! { "$setOnInsert": filter.clone() };

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let drink = self
            .collection
            .find_one_and_update(filter, update)
            .with_options(options)
            .await?
            .ok_or_else(|| DrinkError::Database {
                message: "upsert returned no document".to_string(),
                source: None,
            })?;

        Ok(drink.id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<Drink>> {
        let drink = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(drink)
    }
}
