//! In-process catalog with the same observable semantics as the PostgreSQL one.
//! Used by tests and for running the service without a database.

use super::Catalog;
use crate::error::AppError;
use crate::model::{Actor, ActorPatch, ActorWithFilms, Movie, MoviePatch, NewActor, NewMovie};
use crate::sql::{MovieOrder, SortColumn, SortDirection};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    last_actor_id: i64,
    last_movie_id: i64,
    actors: BTreeMap<i64, Actor>,
    movies: BTreeMap<i64, Movie>,
    /// (actor_id, movie_id) in insertion order; duplicates allowed.
    links: Vec<(i64, i64)>,
}

#[derive(Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn matches_fragment(haystack: &str, fragment: &str) -> bool {
    haystack.to_lowercase().contains(&fragment.to_lowercase())
}

fn compare(a: &Movie, b: &Movie, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Title => a.title.cmp(&b.title),
        SortColumn::Rating => a.rating.total_cmp(&b.rating),
        SortColumn::DateOfIssue => a.date_of_issue.cmp(&b.date_of_issue),
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn save_actor(&self, actor: NewActor) -> Result<Actor, AppError> {
        let mut t = self.write();
        t.last_actor_id += 1;
        let created = actor.into_actor(t.last_actor_id);
        t.actors.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_actor(&self, id: i64, patch: ActorPatch) -> Result<Actor, AppError> {
        let mut t = self.write();
        let current = t.actors.remove(&id).ok_or_else(|| AppError::actor_not_found(id))?;
        let merged = patch.merge_into(current);
        t.actors.insert(id, merged.clone());
        Ok(merged)
    }

    async fn delete_actor(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.write();
        if t.actors.remove(&id).is_none() {
            return Err(AppError::actor_not_found(id));
        }
        t.links.retain(|&(actor_id, _)| actor_id != id);
        Ok(())
    }

    async fn list_actors(&self) -> Result<Vec<ActorWithFilms>, AppError> {
        let t = self.read();
        let rows = t
            .actors
            .values()
            .map(|a| {
                let mut movie_ids: Vec<i64> = t
                    .links
                    .iter()
                    .filter(|&&(actor_id, _)| actor_id == a.id)
                    .map(|&(_, movie_id)| movie_id)
                    .collect();
                movie_ids.sort_unstable();
                let films = movie_ids
                    .iter()
                    .filter_map(|id| t.movies.get(id))
                    .map(|m| m.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                ActorWithFilms {
                    id: a.id,
                    name: a.name.clone(),
                    sex: a.sex.clone(),
                    birthday: a.birthday,
                    films,
                }
            })
            .collect();
        Ok(rows)
    }

    async fn save_movie(&self, movie: NewMovie, actor_ids: &[i64]) -> Result<Movie, AppError> {
        let mut t = self.write();
        if let Some(&missing) = actor_ids.iter().find(|id| !t.actors.contains_key(*id)) {
            return Err(AppError::actor_not_found(missing));
        }
        t.last_movie_id += 1;
        let created = movie.into_movie(t.last_movie_id);
        t.movies.insert(created.id, created.clone());
        t.links
            .extend(actor_ids.iter().map(|&actor_id| (actor_id, created.id)));
        Ok(created)
    }

    async fn update_movie(&self, id: i64, patch: MoviePatch) -> Result<Movie, AppError> {
        let mut t = self.write();
        let current = t.movies.remove(&id).ok_or_else(|| AppError::movie_not_found(id))?;
        let merged = patch.merge_into(current);
        t.movies.insert(id, merged.clone());
        Ok(merged)
    }

    async fn delete_movie(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.write();
        if t.movies.remove(&id).is_none() {
            return Err(AppError::movie_not_found(id));
        }
        t.links.retain(|&(_, movie_id)| movie_id != id);
        Ok(())
    }

    async fn find_movies_by_title(&self, fragment: &str) -> Result<Vec<Movie>, AppError> {
        let t = self.read();
        Ok(t.movies
            .values()
            .filter(|m| matches_fragment(&m.title, fragment))
            .cloned()
            .collect())
    }

    async fn find_movies_by_actor_name(&self, fragment: &str) -> Result<Vec<Movie>, AppError> {
        let t = self.read();
        let mut out = Vec::new();
        for movie in t.movies.values() {
            let mut actor_ids: Vec<i64> = t
                .links
                .iter()
                .filter(|&&(_, movie_id)| movie_id == movie.id)
                .map(|&(actor_id, _)| actor_id)
                .collect();
            actor_ids.sort_unstable();
            let hits = actor_ids
                .iter()
                .filter_map(|id| t.actors.get(id))
                .filter(|a| matches_fragment(&a.name, fragment))
                .count();
            out.extend(std::iter::repeat(movie).take(hits).cloned());
        }
        Ok(out)
    }

    async fn sorted_movies(&self, order: MovieOrder) -> Result<Vec<Movie>, AppError> {
        let t = self.read();
        let mut rows: Vec<Movie> = t.movies.values().cloned().collect();
        rows.sort_by(|a, b| {
            let primary = match order.direction {
                SortDirection::Asc => compare(a, b, order.column),
                SortDirection::Desc => compare(b, a, order.column),
            };
            primary.then(a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
