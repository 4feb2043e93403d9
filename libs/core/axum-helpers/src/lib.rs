//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the HTTP surface.
//!
//! ## Modules
//!
//! - **[`session`]**: session-based authorization guard with a Redis-backed
//!   token store and an explicit [`CurrentUser`] request context
//! - **[`server`]**: server setup, health checks, graceful shutdown
//! - **[`http`]**: cross-cutting HTTP middleware (CORS, security headers)
//! - **[`errors`]**: error types mapped to the API's wire codes
//! - **[`extractors`]**: JSON extractor with rejection mapping + validation
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     create_app(router, &ServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod session;

// Re-export session guard types
pub use session::{
    extract_token_from_request, session_auth_middleware, CurrentUser, MemorySessionStore,
    RedisSessionStore, SessionAuth, SessionConfig, SessionStore, SESSION_COOKIE,
};

// Re-export server types
pub use server::{
    create_app, create_router, health_router, run_health_checks, shutdown_signal,
    HealthCheckFuture, HealthResponse,
};

// Re-export HTTP middleware
pub use http::{cors_layer_from_env, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;
