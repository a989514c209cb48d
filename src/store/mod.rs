//! Record store and query service behind one trait, with a PostgreSQL and an in-process backend.

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;
pub use schema::{ensure_database_exists, ensure_schema};

use crate::error::AppError;
use crate::model::{Actor, ActorPatch, ActorWithFilms, Movie, MoviePatch, NewActor, NewMovie};
use crate::sql::MovieOrder;
use async_trait::async_trait;

/// Persistence for actors, movies and the links between them.
///
/// Implementations hold no per-request state and are shared across tasks.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Insert an actor; the store assigns the id. Duplicates are allowed.
    async fn save_actor(&self, actor: NewActor) -> Result<Actor, AppError>;

    /// Merge the supplied fields into the stored actor.
    ///
    /// Returns `AppError::NotFound` (actor) if `id` does not exist.
    async fn update_actor(&self, id: i64, patch: ActorPatch) -> Result<Actor, AppError>;

    /// Returns `AppError::NotFound` (actor) if nothing was deleted.
    async fn delete_actor(&self, id: i64) -> Result<(), AppError>;

    /// Every actor with the comma-joined titles of its movies, by id.
    async fn list_actors(&self) -> Result<Vec<ActorWithFilms>, AppError>;

    /// Insert a movie and link it to `actor_ids` atomically.
    ///
    /// An unknown actor id yields `AppError::NotFound` (actor) and nothing is persisted.
    async fn save_movie(&self, movie: NewMovie, actor_ids: &[i64]) -> Result<Movie, AppError>;

    /// Returns `AppError::NotFound` (movie) if `id` does not exist.
    async fn update_movie(&self, id: i64, patch: MoviePatch) -> Result<Movie, AppError>;

    /// Returns `AppError::NotFound` (movie) if nothing was deleted.
    async fn delete_movie(&self, id: i64) -> Result<(), AppError>;

    /// Case-insensitive literal substring match on title.
    async fn find_movies_by_title(&self, fragment: &str) -> Result<Vec<Movie>, AppError>;

    /// Case-insensitive substring match on any linked actor's name.
    /// A movie appears once per matching link.
    async fn find_movies_by_actor_name(&self, fragment: &str) -> Result<Vec<Movie>, AppError>;

    async fn sorted_movies(&self, order: MovieOrder) -> Result<Vec<Movie>, AppError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
