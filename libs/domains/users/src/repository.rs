use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for user persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by id
    async fn get_by_id(&self, id: &ObjectId) -> UserResult<Option<User>>;

    /// Get a user by (lowercased) email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub UserRepository {}

        #[async_trait]
        impl UserRepository for UserRepository {
            async fn create(&self, user: User) -> UserResult<User>;
            async fn get_by_id(&self, id: &ObjectId) -> UserResult<Option<User>>;
            async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;
        }
    }
}
