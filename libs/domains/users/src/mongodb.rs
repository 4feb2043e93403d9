//! MongoDB implementation of UserRepository

use crate::error::UserResult;
use crate::models::User;
use crate::repository::UserRepository;
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use tracing::instrument;

/// MongoDB-based user repository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("users"),
        }
    }

    /// Create the unique email index. The service checks for duplicates
    /// before inserting; this index closes the race.
    pub async fn create_indexes(&self) -> UserResult<()> {
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &ObjectId) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "email": email.to_lowercase() })
            .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn create_and_find_by_email() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&url).await.unwrap();
        let repo = MongoUserRepository::new(&client.database("pourlog_test"));

        let email = format!("{}@example.com", ObjectId::new().to_hex());
        let user = User::new(email.clone(), "Test", "hash".to_string());
        repo.create(user).await.unwrap();

        let found = repo.get_by_email(&email).await.unwrap();
        assert!(found.is_some());
    }
}
