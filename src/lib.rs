//! Movie catalog: actors, movies and their many-to-many links over PostgreSQL, served as a REST API.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{CredentialVerifier, StaticToken};
pub use config::{AppConfig, Environment};
pub use error::{AppError, ConfigError, EntityKind, ValidationError};
pub use routes::app;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema, Catalog, MemoryCatalog, PgCatalog};
