//! Actor handlers: list, create, patch, delete.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::{ApiJson, Authorized};
use crate::model::{Actor, ActorInput, ActorPatchInput, ActorWithFilms};
use crate::response::{success_created, success_many, success_one_ok};
use crate::service::EntityValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/actors",
    tag = "actors",
    responses((status = 200, description = "Every actor with the titles of its movies", body = [ActorWithFilms]))
)]
pub async fn list_actors(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.catalog.list_actors().await?;
    Ok(success_many(rows))
}

#[utoipa::path(
    post,
    path = "/api/v1/actors",
    tag = "actors",
    request_body = ActorInput,
    security(("api_token" = [])),
    responses(
        (status = 201, description = "Actor created", body = Actor),
        (status = 401, description = "Missing or wrong token"),
        (status = 422, description = "Field constraint violated")
    )
)]
pub async fn create_actor(
    _auth: Authorized,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ActorInput>,
) -> Result<impl IntoResponse, AppError> {
    let actor = EntityValidator::actor(body)?;
    let created = state.catalog.save_actor(actor).await?;
    tracing::info!(id = created.id, "actor created");
    Ok(success_created(created))
}

#[utoipa::path(
    patch,
    path = "/api/v1/actors/{id}",
    tag = "actors",
    params(("id" = i64, Path, description = "Actor id")),
    request_body = ActorPatchInput,
    security(("api_token" = [])),
    responses(
        (status = 200, description = "Merged actor", body = Actor),
        (status = 404, description = "No such actor")
    )
)]
pub async fn update_actor(
    _auth: Authorized,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ApiJson(body): ApiJson<ActorPatchInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch = EntityValidator::actor_patch(body)?;
    let updated = state.catalog.update_actor(id, patch).await?;
    Ok(success_one_ok(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/actors/{id}",
    tag = "actors",
    params(("id" = i64, Path, description = "Actor id")),
    security(("api_token" = [])),
    responses(
        (status = 204, description = "Actor and its movie links removed"),
        (status = 404, description = "No such actor")
    )
)]
pub async fn delete_actor(
    _auth: Authorized,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.catalog.delete_actor(id).await?;
    tracing::info!(id, "actor deleted");
    Ok(StatusCode::NO_CONTENT)
}
