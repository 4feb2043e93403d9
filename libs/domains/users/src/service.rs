use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{RegisterRequest, User};
use crate::repository::UserRepository;

/// Service layer for account business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

// Manual impl: cloning shares the repository, so R itself need not be Clone
impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new account with a hashed password.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<User> {
        let email = input.email.to_lowercase();

        if self.repository.get_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(email, input.name, password_hash);

        self.repository.create(user).await
    }

    /// Verify credentials and return the account.
    ///
    /// An unknown email and a wrong password are the same error.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .get_by_email(&email.to_lowercase())
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get an account by its session-carried id.
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: &str) -> UserResult<User> {
        let id = ObjectId::parse_str(user_id)?;

        self.repository
            .get_by_id(&id)
            .await?
            .ok_or(UserError::NotFound)
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockUserRepository;

    fn register_input(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            name: "Someone".to_string(),
            password: "correct horse battery".to_string(),
        }
    }

    #[tokio::test]
    async fn register_hashes_the_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|user| {
                user.password_hash != "correct horse battery"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(repo);
        let user = service
            .register(register_input("Person@Example.com"))
            .await
            .unwrap();

        assert_eq!(user.email, "person@example.com");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|email| {
            Ok(Some(User::new(email, "Existing", "hash".to_string())))
        });
        repo.expect_create().times(0);

        let service = UserService::new(repo);
        let err = service
            .register(register_input("taken@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn authenticate_roundtrips_through_the_hash() {
        let mut seed = MockUserRepository::new();
        seed.expect_get_by_email().returning(|_| Ok(None));
        seed.expect_create().returning(Ok);
        let seed_service = UserService::new(seed);
        let user = seed_service
            .register(register_input("login@example.com"))
            .await
            .unwrap();

        let mut repo = MockUserRepository::new();
        let stored = user.clone();
        repo.expect_get_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = UserService::new(repo);

        assert!(service
            .authenticate("login@example.com", "correct horse battery")
            .await
            .is_ok());

        let err = service
            .authenticate("login@example.com", "wrong password")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn authenticate_unknown_email_is_the_same_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));

        let service = UserService::new(repo);
        let err = service
            .authenticate("ghost@example.com", "whatever")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn get_with_malformed_id_is_a_store_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().times(0);

        let service = UserService::new(repo);
        let err = service.get("not-an-id").await.unwrap_err();
        assert!(matches!(err, UserError::Database { .. }));
    }
}
