//! Users Domain
//!
//! Accounts behind the session guard: registration with argon2 password
//! hashing, credential login that issues a Redis-backed session cookie, and
//! the logout/whoami pair for session management. The events domain never
//! touches this crate; it only consumes the `CurrentUser` context the guard
//! derives from sessions issued here.

use utoipa::OpenApi;

mod error;
pub mod handlers;
mod models;
mod mongodb;
mod repository;
mod service;

pub use error::{UserError, UserResult};
pub use handlers::{account_router, auth_router, AuthState};
pub use models::{LoginRequest, RegisterRequest, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;

/// OpenAPI documentation for the auth API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::register,
        handlers::login,
        handlers::logout,
        handlers::me,
    ),
    components(schemas(RegisterRequest, LoginRequest, UserResponse)),
    tags(
        (name = "auth", description = "Accounts and sessions")
    )
)]
pub struct ApiDoc;
