//! Actor and movie routes. Reads are open; writes go through the `Authorized` extractor.

use crate::handlers::{
    create_actor, create_movie, delete_actor, delete_movie, list_actors, search_by_actor,
    search_by_title, sorted_movies, update_actor, update_movie,
};
use crate::openapi::openapi_json;
use crate::state::AppState;
use axum::{routing::get, routing::patch, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/actors", get(list_actors).post(create_actor))
        .route("/actors/:id", patch(update_actor).delete(delete_actor))
        .route("/movies", get(sorted_movies).post(create_movie))
        .route("/movies/search/title", get(search_by_title))
        .route("/movies/search/actor", get(search_by_actor))
        .route("/movies/:id", patch(update_movie).delete(delete_movie))
        .route("/openapi.json", get(openapi_json))
        .with_state(state)
}
