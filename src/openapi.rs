//! OpenAPI document served at `/api/v1/openapi.json`.

use crate::handlers::{actors, movies};
use crate::model::{
    Actor, ActorInput, ActorPatchInput, ActorWithFilms, Movie, MovieInput, MoviePatchInput,
};
use axum::Json;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(title = "Movie catalog API", description = "Actors, movies and the links between them"),
    paths(
        actors::list_actors,
        actors::create_actor,
        actors::update_actor,
        actors::delete_actor,
        movies::sorted_movies,
        movies::search_by_title,
        movies::search_by_actor,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
    ),
    components(schemas(
        Actor,
        ActorWithFilms,
        ActorInput,
        ActorPatchInput,
        Movie,
        MovieInput,
        MoviePatchInput,
    )),
    modifiers(&TokenSecurity),
    tags(
        (name = "actors", description = "Actor records"),
        (name = "movies", description = "Movie records, searches and actor links")
    )
)]
pub struct ApiDoc;

/// Registers the `api_token` scheme: the token goes in the `Authorization` header.
struct TokenSecurity;

impl Modify for TokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            );
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
