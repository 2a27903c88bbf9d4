/*
 * Responsibility
 * - Handler modules
 * - Shared extractor-rejection mapping (so every failure uses the AppError body)
 */
use axum::{
    Json,
    extract::{
        Path,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::error::AppError;

pub mod actors;
pub mod health;
pub mod movies;

// A non-integer id cannot name a resource.
fn path_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, AppError> {
    id.map(|Path(id)| id).map_err(|_| AppError::NotFound)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(body)| body)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}
