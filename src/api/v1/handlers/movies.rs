/*
 * Responsibility
 * - /movies CRUD handlers
 * - Only reachable through the authorization gate (AuthCtx is always present)
 * - Body validation → CastStore call → response envelope
 */
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            common::DeletedResponse,
            movies::{MovieEnvelope, MovieListResponse, MovieRequest},
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

use super::{json_body, path_id};

pub async fn list_movies(
    State(state): State<AppState>,
    _auth: AuthCtxExtractor,
) -> Result<Json<MovieListResponse>, AppError> {
    let rows = state.store.list_movies().await?;

    Ok(Json(MovieListResponse {
        success: true,
        movies: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_movie(
    State(state): State<AppState>,
    _auth: AuthCtxExtractor,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MovieEnvelope>, AppError> {
    let id = path_id(id)?;
    let row = state.store.get_movie(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(MovieEnvelope::new(row)))
}

pub async fn create_movie(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    body: Result<Json<MovieRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MovieEnvelope>), AppError> {
    let movie = json_body(body)?
        .validate()
        .map_err(AppError::bad_request)?;

    let row = state.store.create_movie(movie).await?;
    tracing::info!(sub = %auth.subject(), movie_id = row.id, "movie created");

    Ok((StatusCode::CREATED, Json(MovieEnvelope::new(row))))
}

pub async fn update_movie(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<MovieRequest>, JsonRejection>,
) -> Result<Json<MovieEnvelope>, AppError> {
    let id = path_id(id)?;

    // unknown id wins over a bad body
    if state.store.get_movie(id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let movie = json_body(body)?
        .validate()
        .map_err(AppError::bad_request)?;

    let row = state
        .store
        .update_movie(id, movie)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(sub = %auth.subject(), movie_id = row.id, "movie updated");

    Ok(Json(MovieEnvelope::new(row)))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeletedResponse>, AppError> {
    let id = path_id(id)?;
    let row = state
        .store
        .delete_movie(id)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(
        sub = %auth.subject(),
        permissions = ?auth.permissions(),
        movie_id = row.id,
        "movie deleted"
    );

    Ok(Json(DeletedResponse::new(format!(
        "movie id {}, titled {} was deleted",
        row.id, row.title
    ))))
}
