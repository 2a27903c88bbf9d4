//! In-process `CastStore` used by the router tests.
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::repos::error::RepoError;
use crate::repos::store::{ActorRow, CastStore, MovieRow, NewActor, NewMovie};

#[derive(Debug, Default)]
struct Tables {
    next_movie_id: i32,
    next_actor_id: i32,
    movies: BTreeMap<i32, MovieRow>,
    actors: BTreeMap<i32, ActorRow>,
}

#[derive(Debug, Default)]
pub struct InMemoryCastStore {
    tables: RwLock<Tables>,
}

impl InMemoryCastStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CastStore for InMemoryCastStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_movies(&self) -> Result<Vec<MovieRow>, RepoError> {
        Ok(self.tables.read().await.movies.values().cloned().collect())
    }

    async fn get_movie(&self, id: i32) -> Result<Option<MovieRow>, RepoError> {
        Ok(self.tables.read().await.movies.get(&id).cloned())
    }

    async fn create_movie(&self, movie: NewMovie) -> Result<MovieRow, RepoError> {
        let mut tables = self.tables.write().await;
        tables.next_movie_id += 1;
        let row = MovieRow {
            id: tables.next_movie_id,
            title: movie.title,
            release_date: movie.release_date,
        };
        tables.movies.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_movie(&self, id: i32, movie: NewMovie) -> Result<Option<MovieRow>, RepoError> {
        let mut tables = self.tables.write().await;
        Ok(tables.movies.get_mut(&id).map(|row| {
            row.title = movie.title;
            row.release_date = movie.release_date;
            row.clone()
        }))
    }

    async fn delete_movie(&self, id: i32) -> Result<Option<MovieRow>, RepoError> {
        Ok(self.tables.write().await.movies.remove(&id))
    }

    async fn list_actors(&self) -> Result<Vec<ActorRow>, RepoError> {
        Ok(self.tables.read().await.actors.values().cloned().collect())
    }

    async fn get_actor(&self, id: i32) -> Result<Option<ActorRow>, RepoError> {
        Ok(self.tables.read().await.actors.get(&id).cloned())
    }

    async fn create_actor(&self, actor: NewActor) -> Result<ActorRow, RepoError> {
        let mut tables = self.tables.write().await;
        tables.next_actor_id += 1;
        let row = ActorRow {
            id: tables.next_actor_id,
            name: actor.name,
            age: actor.age,
            gender: actor.gender,
        };
        tables.actors.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_actor(&self, id: i32, actor: NewActor) -> Result<Option<ActorRow>, RepoError> {
        let mut tables = self.tables.write().await;
        Ok(tables.actors.get_mut(&id).map(|row| {
            row.name = actor.name;
            row.age = actor.age;
            row.gender = actor.gender;
            row.clone()
        }))
    }

    async fn delete_actor(&self, id: i32) -> Result<Option<ActorRow>, RepoError> {
        Ok(self.tables.write().await.actors.remove(&id))
    }
}
