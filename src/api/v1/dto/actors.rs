/*
 * Responsibility
 * - Actors request/response DTOs
 * - Create and update take the same body; both require every field
 */
use serde::{Deserialize, Serialize};

use crate::repos::{ActorRow, NewActor};

#[derive(Debug, Deserialize)]
pub struct ActorRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl ActorRequest {
    pub fn validate(self) -> Result<NewActor, &'static str> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or("name is required")?;
        let age = self.age.ok_or("age is required")?;
        if age < 0 {
            return Err("age cannot be negative");
        }
        let gender = self
            .gender
            .filter(|g| !g.trim().is_empty())
            .ok_or("gender is required")?;

        Ok(NewActor { name, age, gender })
    }
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

impl From<ActorRow> for ActorResponse {
    fn from(row: ActorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActorListResponse {
    pub success: bool,
    pub actors: Vec<ActorResponse>,
}

#[derive(Debug, Serialize)]
pub struct ActorEnvelope {
    pub success: bool,
    pub actor: ActorResponse,
}

impl ActorEnvelope {
    pub fn new(row: ActorRow) -> Self {
        Self {
            success: true,
            actor: row.into(),
        }
    }
}
