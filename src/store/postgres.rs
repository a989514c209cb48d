//! PostgreSQL-backed catalog over a shared connection pool.

use super::Catalog;
use crate::error::AppError;
use crate::model::{Actor, ActorPatch, ActorWithFilms, Movie, MoviePatch, NewActor, NewMovie};
use crate::sql::{contains_pattern, MovieOrder, ACTOR_COLUMNS, MOVIE_COLUMNS};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        PgCatalog { pool }
    }
}

/// An association insert that trips the actor foreign key means the actor does not exist.
fn link_error(err: sqlx::Error, actor_id: i64) -> AppError {
    match err {
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            AppError::actor_not_found(actor_id)
        }
        other => AppError::Db(other),
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn save_actor(&self, actor: NewActor) -> Result<Actor, AppError> {
        let sql = format!(
            "INSERT INTO actors (name, sex, birthday) VALUES ($1, $2, $3) RETURNING {}",
            ACTOR_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Actor>(&sql)
            .bind(&actor.name)
            .bind(&actor.sex)
            .bind(actor.birthday)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_actor(&self, id: i64, patch: ActorPatch) -> Result<Actor, AppError> {
        // Existence check, merge and write happen in one statement.
        let sql = format!(
            "UPDATE actors SET name = COALESCE($1, name), sex = COALESCE($2, sex), \
             birthday = COALESCE($3, birthday) WHERE id = $4 RETURNING {}",
            ACTOR_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Actor>(&sql)
            .bind(patch.name)
            .bind(patch.sex)
            .bind(patch.birthday)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::actor_not_found(id))
    }

    async fn delete_actor(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM actors WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::actor_not_found(id));
        }
        Ok(())
    }

    async fn list_actors(&self) -> Result<Vec<ActorWithFilms>, AppError> {
        let sql = r#"
            SELECT a.id, a.name, a.sex, a.birthday,
                   COALESCE(STRING_AGG(m.title, ', ' ORDER BY m.id), '') AS films
            FROM actors a
            LEFT JOIN actors_movies am ON am.actor_id = a.id
            LEFT JOIN movies m ON m.id = am.movie_id
            GROUP BY a.id, a.name, a.sex, a.birthday
            ORDER BY a.id
        "#;
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, ActorWithFilms>(sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn save_movie(&self, movie: NewMovie, actor_ids: &[i64]) -> Result<Movie, AppError> {
        let sql = format!(
            "INSERT INTO movies (title, description, date_of_issue, rating) VALUES ($1, $2, $3, $4) RETURNING {}",
            MOVIE_COLUMNS
        );
        tracing::debug!(sql = %sql, actor_ids = ?actor_ids, "query (tx)");
        // Rolled back on drop unless committed below.
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, Movie>(&sql)
            .bind(&movie.title)
            .bind(&movie.description)
            .bind(movie.date_of_issue)
            .bind(movie.rating)
            .fetch_one(&mut *tx)
            .await?;
        for &actor_id in actor_ids {
            sqlx::query("INSERT INTO actors_movies (actor_id, movie_id) VALUES ($1, $2)")
                .bind(actor_id)
                .bind(created.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| link_error(e, actor_id))?;
        }
        tx.commit().await?;
        Ok(created)
    }

    async fn update_movie(&self, id: i64, patch: MoviePatch) -> Result<Movie, AppError> {
        let sql = format!(
            "UPDATE movies SET title = COALESCE($1, title), description = COALESCE($2, description), \
             date_of_issue = COALESCE($3, date_of_issue), rating = COALESCE($4, rating) \
             WHERE id = $5 RETURNING {}",
            MOVIE_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Movie>(&sql)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.date_of_issue)
            .bind(patch.rating)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::movie_not_found(id))
    }

    async fn delete_movie(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM movies WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::movie_not_found(id));
        }
        Ok(())
    }

    async fn find_movies_by_title(&self, fragment: &str) -> Result<Vec<Movie>, AppError> {
        let sql = format!(
            "SELECT {} FROM movies WHERE title ILIKE $1 ORDER BY id",
            MOVIE_COLUMNS
        );
        let pattern = contains_pattern(fragment);
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        let rows = sqlx::query_as::<_, Movie>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_movies_by_actor_name(&self, fragment: &str) -> Result<Vec<Movie>, AppError> {
        let sql = r#"
            SELECT m.id, m.title, m.description, m.date_of_issue, m.rating
            FROM movies m
            JOIN actors_movies am ON am.movie_id = m.id
            JOIN actors a ON a.id = am.actor_id
            WHERE a.name ILIKE $1
            ORDER BY m.id, a.id
        "#;
        let pattern = contains_pattern(fragment);
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        let rows = sqlx::query_as::<_, Movie>(sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn sorted_movies(&self, order: MovieOrder) -> Result<Vec<Movie>, AppError> {
        let sql = format!("SELECT {} FROM movies{}", MOVIE_COLUMNS, order.to_sql());
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Movie>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// These run only when `TEST_DATABASE_URL` names a disposable database; otherwise they
/// return early. Rows are tagged per test so runs never see each other's data.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityKind;
    use crate::store::ensure_schema;
    use chrono::NaiveDate;
    use sqlx::postgres::PgPoolOptions;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tokio::sync::OnceCell;

    const DATABASE_URL_VAR: &str = "TEST_DATABASE_URL";

    // Concurrent CREATE TABLE IF NOT EXISTS can still collide on a fresh database.
    static SCHEMA: OnceCell<()> = OnceCell::const_new();

    async fn catalog() -> Option<PgCatalog> {
        let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
            eprintln!("{DATABASE_URL_VAR} not set; skipping");
            return None;
        };
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("connect to test database");
        SCHEMA
            .get_or_init(|| async { ensure_schema(&pool).await.expect("bootstrap schema") })
            .await;
        Some(PgCatalog::new(pool))
    }

    fn tag(label: &str) -> String {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        format!("{label} {nanos}")
    }

    fn actor(name: &str) -> NewActor {
        NewActor {
            name: name.to_string(),
            sex: "M".into(),
            birthday: NaiveDate::from_ymd_opt(1974, 11, 11).unwrap(),
        }
    }

    fn movie(title: &str, rating: f64) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            description: "dreams within dreams".into(),
            date_of_issue: NaiveDate::from_ymd_opt(2010, 7, 16).unwrap(),
            rating,
        }
    }

    #[tokio::test]
    async fn update_merges_supplied_fields_only() {
        let Some(catalog) = catalog().await else { return };
        let saved = catalog.save_actor(actor(&tag("Leonardo"))).await.unwrap();
        let renamed = tag("Leo");
        let updated = catalog
            .update_actor(
                saved.id,
                ActorPatch {
                    name: Some(renamed.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, renamed);
        assert_eq!(updated.sex, saved.sex);
        assert_eq!(updated.birthday, saved.birthday);

        let m = catalog.save_movie(movie(&tag("Cats"), 2.8), &[]).await.unwrap();
        let updated = catalog
            .update_movie(
                m.id,
                MoviePatch {
                    description: Some(String::new()),
                    rating: Some(0.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.rating, 0.0);
        assert_eq!(updated.description, "");
        assert_eq!(updated.title, m.title);
        assert_eq!(updated.date_of_issue, m.date_of_issue);
    }

    #[tokio::test]
    async fn updating_missing_rows_is_not_found() {
        let Some(catalog) = catalog().await else { return };
        let err = catalog.update_actor(-1, ActorPatch::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: EntityKind::Actor, id: -1 }));
        let err = catalog.update_movie(-1, MoviePatch::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: EntityKind::Movie, id: -1 }));
    }

    #[tokio::test]
    async fn unknown_actor_leaves_no_movie_behind() {
        let Some(catalog) = catalog().await else { return };
        let a = catalog.save_actor(actor(&tag("Tom Hardy"))).await.unwrap();
        let title = tag("Shutter Island");
        let err = catalog
            .save_movie(movie(&title, 8.2), &[a.id, -1])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: EntityKind::Actor, id: -1 }));
        assert!(catalog.find_movies_by_title(&title).await.unwrap().is_empty());

        let listed = catalog.list_actors().await.unwrap();
        let row = listed.iter().find(|r| r.id == a.id).unwrap();
        assert_eq!(row.films, "");
    }

    #[tokio::test]
    async fn inception_is_found_by_title_and_both_actors() {
        let Some(catalog) = catalog().await else { return };
        let leo = catalog.save_actor(actor(&tag("Leonardo DiCaprio"))).await.unwrap();
        let page = catalog.save_actor(actor(&tag("Elliot Page"))).await.unwrap();
        let title = tag("Inception");
        let m = catalog
            .save_movie(movie(&title, 8.8), &[leo.id, page.id])
            .await
            .unwrap();

        let found = catalog.find_movies_by_title(&title.to_uppercase()).await.unwrap();
        assert_eq!(found, vec![m.clone()]);
        for name in [&leo.name, &page.name] {
            let found = catalog
                .find_movies_by_actor_name(&name.to_lowercase())
                .await
                .unwrap();
            assert_eq!(found, vec![m.clone()], "{name}");
        }

        let sequel = tag("Inception II");
        catalog.save_movie(movie(&sequel, 9.0), &[leo.id]).await.unwrap();
        let listed = catalog.list_actors().await.unwrap();
        let row = listed.iter().find(|r| r.id == leo.id).unwrap();
        assert_eq!(row.films, format!("{}, {}", title, sequel));
    }

    #[tokio::test]
    async fn like_wildcards_match_literally() {
        let Some(catalog) = catalog().await else { return };
        let marker = tag("wildcards");
        let percent = catalog
            .save_movie(movie(&format!("{marker} 50% off"), 5.0), &[])
            .await
            .unwrap();
        catalog
            .save_movie(movie(&format!("{marker} 50 off"), 5.0), &[])
            .await
            .unwrap();
        let underscore = catalog
            .save_movie(movie(&format!("{marker} a_b"), 5.0), &[])
            .await
            .unwrap();
        catalog
            .save_movie(movie(&format!("{marker} axb"), 5.0), &[])
            .await
            .unwrap();

        let found = catalog
            .find_movies_by_title(&format!("{marker} 50%"))
            .await
            .unwrap();
        assert_eq!(found, vec![percent]);
        let found = catalog
            .find_movies_by_title(&format!("{marker} a_b"))
            .await
            .unwrap();
        assert_eq!(found, vec![underscore]);
    }

    #[tokio::test]
    async fn deletes_cascade_and_report_missing_rows() {
        let Some(catalog) = catalog().await else { return };
        let a = catalog.save_actor(actor(&tag("Tom Berenger"))).await.unwrap();
        let m = catalog.save_movie(movie(&tag("Platoon"), 8.1), &[a.id]).await.unwrap();

        catalog.delete_movie(m.id).await.unwrap();
        let listed = catalog.list_actors().await.unwrap();
        assert_eq!(listed.iter().find(|r| r.id == a.id).unwrap().films, "");
        let err = catalog.delete_movie(m.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: EntityKind::Movie, .. }));

        catalog.delete_actor(a.id).await.unwrap();
        let err = catalog.delete_actor(a.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: EntityKind::Actor, .. }));
    }
}
