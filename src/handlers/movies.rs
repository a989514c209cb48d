//! Movie handlers: sorted listing, searches, create with actor links, patch, delete.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::{ApiJson, Authorized};
use crate::model::{Movie, MovieInput, MoviePatchInput};
use crate::response::{success_created, success_many, success_one_ok};
use crate::service::EntityValidator;
use crate::sql::SortQuery;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FragmentQuery {
    /// Case-insensitive substring to look for.
    pub fragment: Option<String>,
}

impl FragmentQuery {
    fn required(&self) -> Result<&str, AppError> {
        self.fragment
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("fragment is required".into()))
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/movies",
    tag = "movies",
    params(SortQuery),
    responses(
        (status = 200, description = "Movies in the requested order", body = [Movie]),
        (status = 422, description = "Sort column or order not allowed")
    )
)]
pub async fn sorted_movies(
    State(state): State<AppState>,
    Query(params): Query<SortQuery>,
) -> Result<impl IntoResponse, AppError> {
    let order = params.resolve()?;
    let rows = state.catalog.sorted_movies(order).await?;
    Ok(success_many(rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/search/title",
    tag = "movies",
    params(FragmentQuery),
    responses(
        (status = 200, description = "Movies whose title contains the fragment", body = [Movie]),
        (status = 400, description = "Missing fragment")
    )
)]
pub async fn search_by_title(
    State(state): State<AppState>,
    Query(params): Query<FragmentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let fragment = params.required()?;
    let rows = state.catalog.find_movies_by_title(fragment).await?;
    Ok(success_many(rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/search/actor",
    tag = "movies",
    params(FragmentQuery),
    responses(
        (status = 200, description = "Movies with a linked actor whose name contains the fragment", body = [Movie]),
        (status = 400, description = "Missing fragment")
    )
)]
pub async fn search_by_actor(
    State(state): State<AppState>,
    Query(params): Query<FragmentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let fragment = params.required()?;
    let rows = state.catalog.find_movies_by_actor_name(fragment).await?;
    Ok(success_many(rows))
}

#[utoipa::path(
    post,
    path = "/api/v1/movies",
    tag = "movies",
    request_body = MovieInput,
    security(("api_token" = [])),
    responses(
        (status = 201, description = "Movie created and linked", body = Movie),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "An actor id does not exist; nothing was stored"),
        (status = 422, description = "Field constraint violated")
    )
)]
pub async fn create_movie(
    _auth: Authorized,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<MovieInput>,
) -> Result<impl IntoResponse, AppError> {
    let (movie, actor_ids) = EntityValidator::movie(body)?;
    let created = state.catalog.save_movie(movie, &actor_ids).await?;
    tracing::info!(id = created.id, links = actor_ids.len(), "movie created");
    Ok(success_created(created))
}

#[utoipa::path(
    patch,
    path = "/api/v1/movies/{id}",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = MoviePatchInput,
    security(("api_token" = [])),
    responses(
        (status = 200, description = "Merged movie", body = Movie),
        (status = 404, description = "No such movie")
    )
)]
pub async fn update_movie(
    _auth: Authorized,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ApiJson(body): ApiJson<MoviePatchInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch = EntityValidator::movie_patch(body)?;
    let updated = state.catalog.update_movie(id, patch).await?;
    Ok(success_one_ok(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    security(("api_token" = [])),
    responses(
        (status = 204, description = "Movie and its actor links removed"),
        (status = 404, description = "No such movie")
    )
)]
pub async fn delete_movie(
    _auth: Authorized,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.catalog.delete_movie(id).await?;
    tracing::info!(id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}
