/*
 * Responsibility
 * - /actors CRUD handlers
 * - Same shape as movies: gate → validation → CastStore → envelope
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
            actors::{ActorEnvelope, ActorListResponse, ActorRequest},
            common::DeletedResponse,
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

use super::{json_body, path_id};

pub async fn list_actors(
    State(state): State<AppState>,
    _auth: AuthCtxExtractor,
) -> Result<Json<ActorListResponse>, AppError> {
    let rows = state.store.list_actors().await?;

    Ok(Json(ActorListResponse {
        success: true,
        actors: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_actor(
    State(state): State<AppState>,
    _auth: AuthCtxExtractor,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ActorEnvelope>, AppError> {
    let id = path_id(id)?;
    let row = state.store.get_actor(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(ActorEnvelope::new(row)))
}

pub async fn create_actor(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    body: Result<Json<ActorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ActorEnvelope>), AppError> {
    let actor = json_body(body)?
        .validate()
        .map_err(AppError::bad_request)?;

    let row = state.store.create_actor(actor).await?;
    tracing::info!(sub = %auth.subject(), actor_id = row.id, "actor created");

    Ok((StatusCode::CREATED, Json(ActorEnvelope::new(row))))
}

pub async fn update_actor(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<ActorRequest>, JsonRejection>,
) -> Result<Json<ActorEnvelope>, AppError> {
    let id = path_id(id)?;

    if state.store.get_actor(id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let actor = json_body(body)?
        .validate()
        .map_err(AppError::bad_request)?;

    let row = state
        .store
        .update_actor(id, actor)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(sub = %auth.subject(), actor_id = row.id, "actor updated");

    Ok(Json(ActorEnvelope::new(row)))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeletedResponse>, AppError> {
    let id = path_id(id)?;
    let row = state
        .store
        .delete_actor(id)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(
        sub = %auth.subject(),
        permissions = ?auth.permissions(),
        actor_id = row.id,
        "actor deleted"
    );

    Ok(Json(DeletedResponse::new(format!(
        "actor id {}, titled {} was deleted",
        row.id, row.name
    ))))
}
