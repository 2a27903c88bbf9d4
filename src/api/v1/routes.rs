/*
 * Responsibility
 * - v1 URL layout
 * - Which permission each method route requires (the gate is attached per route here)
 */
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::middleware::auth::access::require;
use crate::state::AppState;

use crate::api::v1::handlers::{
    actors::{create_actor, delete_actor, get_actor, list_actors, update_actor},
    health::health,
    movies::{create_movie, delete_movie, get_movie, list_movies, update_movie},
};

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // movies
        .route("/movies", require(get(list_movies), state, "get:movies"))
        .route("/movies", require(post(create_movie), state, "post:movies"))
        .route("/movies/{id}", require(get(get_movie), state, "get:movies"))
        .route(
            "/movies/{id}",
            require(patch(update_movie), state, "patch:movies"),
        )
        .route(
            "/movies/{id}",
            require(delete(delete_movie), state, "delete:movies"),
        )
        // actors
        .route("/actors", require(get(list_actors), state, "get:actors"))
        .route("/actors", require(post(create_actor), state, "post:actors"))
        .route("/actors/{id}", require(get(get_actor), state, "get:actors"))
        .route(
            "/actors/{id}",
            require(patch(update_actor), state, "patch:actors"),
        )
        .route(
            "/actors/{id}",
            require(delete(delete_actor), state, "delete:actors"),
        )
}
