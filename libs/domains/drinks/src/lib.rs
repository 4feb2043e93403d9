//! Drinks Domain
//!
//! The drink catalog behind event tracking. Events reference drinks by id;
//! this crate owns the resolution policy: given `(type, name, percentage)`,
//! return the matching drink's id, creating the record when no match exists
//! (a single atomic upsert).

mod error;
mod models;
mod mongodb;
mod repository;

pub use error::{DrinkError, Result};
pub use models::{Drink, DrinkSpec, DrinkType};
pub use mongodb::MongoDrinkRepository;
pub use repository::DrinkRepository;
