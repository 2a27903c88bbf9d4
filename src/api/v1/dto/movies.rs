/*
 * Responsibility
 * - Movies request/response DTOs
 * - Create and update take the same body; both require every field
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repos::{MovieRow, NewMovie};

#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: Option<String>,
    pub release_date: Option<String>, // YYYY-MM-DD
}

impl MovieRequest {
    pub fn validate(self) -> Result<NewMovie, &'static str> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or("title is required")?;

        let release_date = self.release_date.ok_or("release_date is required")?;
        let release_date = NaiveDate::parse_from_str(release_date.trim(), "%Y-%m-%d")
            .map_err(|_| "release_date must be YYYY-MM-DD")?;

        Ok(NewMovie {
            title,
            release_date,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
}

impl From<MovieRow> for MovieResponse {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            release_date: row.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub success: bool,
    pub movies: Vec<MovieResponse>,
}

#[derive(Debug, Serialize)]
pub struct MovieEnvelope {
    pub success: bool,
    pub movie: MovieResponse,
}

impl MovieEnvelope {
    pub fn new(row: MovieRow) -> Self {
        Self {
            success: true,
            movie: row.into(),
        }
    }
}
