/*
 * Responsibility
 * - `CastStore` over Postgres (SQLx)
 * - Creates the movies / actors tables on startup when missing
 */
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::error::RepoError;
use crate::repos::store::{ActorRow, CastStore, MovieRow, NewActor, NewMovie};

#[derive(Clone, Debug)]
pub struct PgCastStore {
    db: PgPool,
}

impl PgCastStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn ensure_schema(&self) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                id SERIAL PRIMARY KEY,
                title VARCHAR NOT NULL,
                release_date DATE NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS actors (
                id SERIAL PRIMARY KEY,
                name VARCHAR NOT NULL,
                age INTEGER NOT NULL,
                gender VARCHAR NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CastStore for PgCastStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list_movies(&self) -> Result<Vec<MovieRow>, RepoError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, release_date
            FROM movies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn get_movie(&self, id: i32) -> Result<Option<MovieRow>, RepoError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, release_date
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn create_movie(&self, movie: NewMovie) -> Result<MovieRow, RepoError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            INSERT INTO movies (title, release_date)
            VALUES ($1, $2)
            RETURNING id, title, release_date
            "#,
        )
        .bind(&movie.title)
        .bind(movie.release_date)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    async fn update_movie(&self, id: i32, movie: NewMovie) -> Result<Option<MovieRow>, RepoError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            UPDATE movies
            SET title = $2, release_date = $3
            WHERE id = $1
            RETURNING id, title, release_date
            "#,
        )
        .bind(id)
        .bind(&movie.title)
        .bind(movie.release_date)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn delete_movie(&self, id: i32) -> Result<Option<MovieRow>, RepoError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            DELETE FROM movies
            WHERE id = $1
            RETURNING id, title, release_date
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn list_actors(&self) -> Result<Vec<ActorRow>, RepoError> {
        let rows = sqlx::query_as::<_, ActorRow>(
            r#"
            SELECT id, name, age, gender
            FROM actors
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn get_actor(&self, id: i32) -> Result<Option<ActorRow>, RepoError> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            SELECT id, name, age, gender
            FROM actors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn create_actor(&self, actor: NewActor) -> Result<ActorRow, RepoError> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            INSERT INTO actors (name, age, gender)
            VALUES ($1, $2, $3)
            RETURNING id, name, age, gender
            "#,
        )
        .bind(&actor.name)
        .bind(actor.age)
        .bind(&actor.gender)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    async fn update_actor(&self, id: i32, actor: NewActor) -> Result<Option<ActorRow>, RepoError> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            UPDATE actors
            SET name = $2, age = $3, gender = $4
            WHERE id = $1
            RETURNING id, name, age, gender
            "#,
        )
        .bind(id)
        .bind(&actor.name)
        .bind(actor.age)
        .bind(&actor.gender)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn delete_actor(&self, id: i32) -> Result<Option<ActorRow>, RepoError> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            DELETE FROM actors
            WHERE id = $1
            RETURNING id, name, age, gender
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
}
