//! Storage traits for persistence
//!
//! Every backend generates ids itself. Updates replace all editable fields;
//! deletes of a missing id are a no-op and never cascade to cast records.

use crate::search;
use crate::Result;
use async_trait::async_trait;
use marquee_types::{
    Cast, Celebrity, Movie, NewCast, NewCelebrity, NewMovie, NewUser, User,
};

/// Movie store
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie>;
    async fn get_movie(&self, id: &str) -> Result<Option<Movie>>;
    async fn list_movies(&self) -> Result<Vec<Movie>>;
    async fn update_movie(&self, id: &str, movie: NewMovie) -> Result<Movie>;
    async fn delete_movie(&self, id: &str) -> Result<()>;

    /// Movies whose title contains `title`, ignoring case. `None` returns all.
    async fn find_movies(&self, title: Option<&str>) -> Result<Vec<Movie>> {
        let movies = self.list_movies().await?;
        Ok(search::filter(movies, title, |m| m.title.as_str()))
    }
}

/// Celebrity store
#[async_trait]
pub trait CelebrityStore: Send + Sync {
    async fn create_celebrity(&self, celebrity: NewCelebrity) -> Result<Celebrity>;
    async fn get_celebrity(&self, id: &str) -> Result<Option<Celebrity>>;
    async fn list_celebrities(&self) -> Result<Vec<Celebrity>>;
    async fn update_celebrity(&self, id: &str, celebrity: NewCelebrity) -> Result<Celebrity>;
    async fn delete_celebrity(&self, id: &str) -> Result<()>;

    /// Celebrities whose name contains `name`, ignoring case. `None` returns all.
    async fn find_celebrities(&self, name: Option<&str>) -> Result<Vec<Celebrity>> {
        let celebrities = self.list_celebrities().await?;
        Ok(search::filter(celebrities, name, |c| c.name.as_str()))
    }
}

/// Cast (movie <-> celebrity join record) store
#[async_trait]
pub trait CastStore: Send + Sync {
    /// Inserts the join record as given. Reference checks belong to the caller.
    async fn create_cast(&self, cast: NewCast) -> Result<Cast>;
    async fn get_cast(&self, id: &str) -> Result<Option<Cast>>;
    async fn list_cast(&self) -> Result<Vec<Cast>>;
    async fn list_cast_by_movie(&self, movie_id: &str) -> Result<Vec<Cast>>;
    async fn list_cast_by_celebrity(&self, celebrity_id: &str) -> Result<Vec<Cast>>;
    async fn delete_cast(&self, id: &str) -> Result<()>;
}

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `DuplicateUsername` when the username is taken
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Everything the catalog handlers need from a backend
pub trait CatalogStore: MovieStore + CelebrityStore + CastStore + UserStore {}

impl<T> CatalogStore for T where T: MovieStore + CelebrityStore + CastStore + UserStore {}
