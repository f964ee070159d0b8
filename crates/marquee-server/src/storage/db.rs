//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use marquee_core::{
    Cast, CastStore, CatalogError, Celebrity, CelebrityStore, Movie, MovieStore, NewCast,
    NewCelebrity, NewMovie, NewUser, User, UserStore,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tracing::info!("Creating parent directory: {}", parent.display());
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database. A single connection is kept alive for the
    /// lifetime of the pool, since each SQLite memory connection is its own database.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let options: SqliteConnectOptions = "sqlite::memory:".parse()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                genre TEXT NOT NULL,
                plot TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS celebrities (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                occupation TEXT NOT NULL,
                catch_phrase TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        // No foreign keys: deleting a movie or celebrity leaves its cast rows behind
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS casts (
                id TEXT PRIMARY KEY,
                movie_id TEXT NOT NULL,
                celebrity_id TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_casts_movie ON casts (movie_id)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_casts_celebrity ON casts (celebrity_id)")
            .execute(pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn storage_error(e: sqlx::Error) -> CatalogError {
    tracing::error!("Database error: {}", e);
    CatalogError::Storage(e.to_string())
}

#[async_trait]
impl MovieStore for Database {
    async fn create_movie(&self, movie: NewMovie) -> marquee_core::Result<Movie> {
        let movie = Movie::from_new(new_id(), movie);

        sqlx::query(
            r#"
            INSERT INTO movies (id, title, genre, plot)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&movie.id)
        .bind(&movie.title)
        .bind(&movie.genre)
        .bind(&movie.plot)
        .execute(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(movie)
    }

    async fn get_movie(&self, id: &str) -> marquee_core::Result<Option<Movie>> {
        let row: Option<MovieRow> = sqlx::query_as(
            r#"
            SELECT id, title, genre, plot FROM movies WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_movies(&self) -> marquee_core::Result<Vec<Movie>> {
        let rows: Vec<MovieRow> = sqlx::query_as(
            r#"
            SELECT id, title, genre, plot FROM movies ORDER BY rowid
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update_movie(&self, id: &str, movie: NewMovie) -> marquee_core::Result<Movie> {
        let result = sqlx::query(
            r#"
            UPDATE movies SET title = ?1, genre = ?2, plot = ?3 WHERE id = ?4
            "#,
        )
        .bind(&movie.title)
        .bind(&movie.genre)
        .bind(&movie.plot)
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("movie", id));
        }
        Ok(Movie::from_new(id.to_string(), movie))
    }

    async fn delete_movie(&self, id: &str) -> marquee_core::Result<()> {
        sqlx::query("DELETE FROM movies WHERE id = ?1")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }
}

#[async_trait]
impl CelebrityStore for Database {
    async fn create_celebrity(&self, celebrity: NewCelebrity) -> marquee_core::Result<Celebrity> {
        let celebrity = Celebrity::from_new(new_id(), celebrity);

        sqlx::query(
            r#"
            INSERT INTO celebrities (id, name, occupation, catch_phrase)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&celebrity.id)
        .bind(&celebrity.name)
        .bind(&celebrity.occupation)
        .bind(&celebrity.catch_phrase)
        .execute(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(celebrity)
    }

    async fn get_celebrity(&self, id: &str) -> marquee_core::Result<Option<Celebrity>> {
        let row: Option<CelebrityRow> = sqlx::query_as(
            r#"
            SELECT id, name, occupation, catch_phrase FROM celebrities WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_celebrities(&self) -> marquee_core::Result<Vec<Celebrity>> {
        let rows: Vec<CelebrityRow> = sqlx::query_as(
            r#"
            SELECT id, name, occupation, catch_phrase FROM celebrities ORDER BY rowid
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update_celebrity(
        &self,
        id: &str,
        celebrity: NewCelebrity,
    ) -> marquee_core::Result<Celebrity> {
        let result = sqlx::query(
            r#"
            UPDATE celebrities SET name = ?1, occupation = ?2, catch_phrase = ?3 WHERE id = ?4
            "#,
        )
        .bind(&celebrity.name)
        .bind(&celebrity.occupation)
        .bind(&celebrity.catch_phrase)
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("celebrity", id));
        }
        Ok(Celebrity::from_new(id.to_string(), celebrity))
    }

    async fn delete_celebrity(&self, id: &str) -> marquee_core::Result<()> {
        sqlx::query("DELETE FROM celebrities WHERE id = ?1")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }
}

#[async_trait]
impl CastStore for Database {
    async fn create_cast(&self, cast: NewCast) -> marquee_core::Result<Cast> {
        let cast = Cast::from_new(new_id(), cast);

        sqlx::query(
            r#"
            INSERT INTO casts (id, movie_id, celebrity_id)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&cast.id)
        .bind(&cast.movie_id)
        .bind(&cast.celebrity_id)
        .execute(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(cast)
    }

    async fn get_cast(&self, id: &str) -> marquee_core::Result<Option<Cast>> {
        let row: Option<CastRow> = sqlx::query_as(
            r#"
            SELECT id, movie_id, celebrity_id FROM casts WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_cast(&self) -> marquee_core::Result<Vec<Cast>> {
        let rows: Vec<CastRow> = sqlx::query_as(
            r#"
            SELECT id, movie_id, celebrity_id FROM casts ORDER BY rowid
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_cast_by_movie(&self, movie_id: &str) -> marquee_core::Result<Vec<Cast>> {
        let rows: Vec<CastRow> = sqlx::query_as(
            r#"
            SELECT id, movie_id, celebrity_id FROM casts
            WHERE movie_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(movie_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_cast_by_celebrity(&self, celebrity_id: &str) -> marquee_core::Result<Vec<Cast>> {
        let rows: Vec<CastRow> = sqlx::query_as(
            r#"
            SELECT id, movie_id, celebrity_id FROM casts
            WHERE celebrity_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(celebrity_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn delete_cast(&self, id: &str) -> marquee_core::Result<()> {
        sqlx::query("DELETE FROM casts WHERE id = ?1")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for Database {
    async fn create_user(&self, user: NewUser) -> marquee_core::Result<User> {
        let user = User {
            id: new_id(),
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&*self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(CatalogError::DuplicateUsername(user.username))
            }
            Err(e) => Err(storage_error(e)),
        }
    }

    async fn get_user(&self, id: &str) -> marquee_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, created_at FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn get_user_by_username(&self, username: &str) -> marquee_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, created_at FROM users WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&*self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(|r| r.into()))
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct MovieRow {
    id: String,
    title: String,
    genre: String,
    plot: String,
}

impl From<MovieRow> for Movie {
    fn from(r: MovieRow) -> Self {
        Movie {
            id: r.id,
            title: r.title,
            genre: r.genre,
            plot: r.plot,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CelebrityRow {
    id: String,
    name: String,
    occupation: String,
    catch_phrase: String,
}

impl From<CelebrityRow> for Celebrity {
    fn from(r: CelebrityRow) -> Self {
        Celebrity {
            id: r.id,
            name: r.name,
            occupation: r.occupation,
            catch_phrase: r.catch_phrase,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CastRow {
    id: String,
    movie_id: String,
    celebrity_id: String,
}

impl From<CastRow> for Cast {
    fn from(r: CastRow) -> Self {
        Cast {
            id: r.id,
            movie_id: r.movie_id,
            celebrity_id: r.celebrity_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            username: r.username,
            password_hash: r.password_hash,
            created_at: r.created_at,
        }
    }
}
