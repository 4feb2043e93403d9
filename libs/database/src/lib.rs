//! Database library providing connectors and utilities for MongoDB and Redis
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `redis` (default) - Redis support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - everything
//!
//! # Examples
//!
//! ## MongoDB
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("pourlog");
//! ```
//!
//! ## Redis
//!
//! ```ignore
//! use database::redis;
//! use redis::AsyncCommands;
//!
//! let mut conn = redis::connect("redis://127.0.0.1:6379").await?;
//! conn.set::<_, _, ()>("key", "value").await?;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult};
