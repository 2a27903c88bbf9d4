/*
 * Responsibility
 * - Storage interface for movies / actors (handlers only see this trait)
 * - Row types shared by every backend
 */
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MovieRow {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ActorRow {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActor {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

/// Movie/actor persistence.
///
/// `update_*` and `delete_*` return `Ok(None)` when no row has the given id; `delete_*`
/// returns the removed row.
#[async_trait]
pub trait CastStore: Send + Sync + 'static {
    fn backend_name(&self) -> &'static str;

    async fn list_movies(&self) -> Result<Vec<MovieRow>, RepoError>;
    async fn get_movie(&self, id: i32) -> Result<Option<MovieRow>, RepoError>;
    async fn create_movie(&self, movie: NewMovie) -> Result<MovieRow, RepoError>;
    async fn update_movie(&self, id: i32, movie: NewMovie) -> Result<Option<MovieRow>, RepoError>;
    async fn delete_movie(&self, id: i32) -> Result<Option<MovieRow>, RepoError>;

    async fn list_actors(&self) -> Result<Vec<ActorRow>, RepoError>;
    async fn get_actor(&self, id: i32) -> Result<Option<ActorRow>, RepoError>;
    async fn create_actor(&self, actor: NewActor) -> Result<ActorRow, RepoError>;
    async fn update_actor(&self, id: i32, actor: NewActor) -> Result<Option<ActorRow>, RepoError>;
    async fn delete_actor(&self, id: i32) -> Result<Option<ActorRow>, RepoError>;
}
