//! In-memory catalog store using DashMap
//!
//! Listing order follows insertion order through a per-store sequence
//! counter, since DashMap iteration order is arbitrary.

use crate::ports::{CastStore, CelebrityStore, MovieStore, UserStore};
use crate::{CatalogError, Result};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use marquee_types::{
    Cast, Celebrity, Movie, NewCast, NewCelebrity, NewMovie, NewUser, User,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct Record<T> {
    seq: u64,
    value: T,
}

/// One collection keyed by id
struct Collection<T> {
    data: Arc<DashMap<String, Record<T>>>,
}

impl<T: Clone> Collection<T> {
    fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    fn insert(&self, seq: u64, id: String, value: T) {
        self.data.insert(id, Record { seq, value });
    }

    fn get(&self, id: &str) -> Option<T> {
        self.data.get(id).map(|r| r.value.clone())
    }

    /// Values matching `keep`, in insertion order
    fn collect<F>(&self, keep: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let mut records: Vec<(u64, T)> = self
            .data
            .iter()
            .filter(|r| keep(&r.value))
            .map(|r| (r.seq, r.value.clone()))
            .collect();
        records.sort_by_key(|(seq, _)| *seq);
        records.into_iter().map(|(_, v)| v).collect()
    }

    /// Replace the value in place, keeping its position
    fn replace(&self, id: &str, value: T) -> bool {
        match self.data.get_mut(id) {
            Some(mut record) => {
                record.value = value;
                true
            }
            None => false,
        }
    }

    fn remove(&self, id: &str) {
        self.data.remove(id);
    }
}

/// Process-local catalog store. Contents are lost on restart.
pub struct MemoryStore {
    seq: AtomicU64,
    movies: Collection<Movie>,
    celebrities: Collection<Celebrity>,
    cast: Collection<Cast>,
    users: Collection<User>,
    usernames: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
            movies: Collection::new(),
            celebrities: Collection::new(),
            cast: Collection::new(),
            users: Collection::new(),
            usernames: DashMap::new(),
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie> {
        let movie = Movie::from_new(new_id(), movie);
        self.movies
            .insert(self.next_seq(), movie.id.clone(), movie.clone());
        Ok(movie)
    }

    async fn get_movie(&self, id: &str) -> Result<Option<Movie>> {
        Ok(self.movies.get(id))
    }

    async fn list_movies(&self) -> Result<Vec<Movie>> {
        Ok(self.movies.collect(|_| true))
    }

    async fn update_movie(&self, id: &str, movie: NewMovie) -> Result<Movie> {
        let movie = Movie::from_new(id.to_string(), movie);
        if self.movies.replace(id, movie.clone()) {
            Ok(movie)
        } else {
            Err(CatalogError::not_found("movie", id))
        }
    }

    async fn delete_movie(&self, id: &str) -> Result<()> {
        self.movies.remove(id);
        Ok(())
    }
}

#[async_trait]
impl CelebrityStore for MemoryStore {
    async fn create_celebrity(&self, celebrity: NewCelebrity) -> Result<Celebrity> {
        let celebrity = Celebrity::from_new(new_id(), celebrity);
        self.celebrities
            .insert(self.next_seq(), celebrity.id.clone(), celebrity.clone());
        Ok(celebrity)
    }

    async fn get_celebrity(&self, id: &str) -> Result<Option<Celebrity>> {
        Ok(self.celebrities.get(id))
    }

    async fn list_celebrities(&self) -> Result<Vec<Celebrity>> {
        Ok(self.celebrities.collect(|_| true))
    }

    async fn update_celebrity(&self, id: &str, celebrity: NewCelebrity) -> Result<Celebrity> {
        let celebrity = Celebrity::from_new(id.to_string(), celebrity);
        if self.celebrities.replace(id, celebrity.clone()) {
            Ok(celebrity)
        } else {
            Err(CatalogError::not_found("celebrity", id))
        }
    }

    async fn delete_celebrity(&self, id: &str) -> Result<()> {
        self.celebrities.remove(id);
        Ok(())
    }
}

#[async_trait]
impl CastStore for MemoryStore {
    async fn create_cast(&self, cast: NewCast) -> Result<Cast> {
        let cast = Cast::from_new(new_id(), cast);
        self.cast.insert(self.next_seq(), cast.id.clone(), cast.clone());
        Ok(cast)
    }

    async fn get_cast(&self, id: &str) -> Result<Option<Cast>> {
        Ok(self.cast.get(id))
    }

    async fn list_cast(&self) -> Result<Vec<Cast>> {
        Ok(self.cast.collect(|_| true))
    }

    async fn list_cast_by_movie(&self, movie_id: &str) -> Result<Vec<Cast>> {
        Ok(self.cast.collect(|c| c.movie_id == movie_id))
    }

    async fn list_cast_by_celebrity(&self, celebrity_id: &str) -> Result<Vec<Cast>> {
        Ok(self.cast.collect(|c| c.celebrity_id == celebrity_id))
    }

    async fn delete_cast(&self, id: &str) -> Result<()> {
        self.cast.remove(id);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        // The username slot stays locked until the user record is stored, so a
        // lookup by username never sees an id without its record.
        match self.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(CatalogError::DuplicateUsername(user.username)),
            Entry::Vacant(slot) => {
                let user = User {
                    id: new_id(),
                    username: user.username,
                    password_hash: user.password_hash,
                    created_at: Utc::now(),
                };
                self.users
                    .insert(self.next_seq(), user.id.clone(), user.clone());
                slot.insert(user.id.clone());
                Ok(user)
            }
        }
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let id = match self.usernames.get(username) {
            Some(id) => id.clone(),
            None => return Ok(None),
        };
        Ok(self.users.get(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alien() -> NewMovie {
        NewMovie {
            title: "Alien".to_string(),
            genre: "Horror".to_string(),
            plot: "A crew meets something in the dark".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_fields() {
        let store = MemoryStore::new();

        let created = store.create_movie(alien()).await.unwrap();
        let fetched = store.get_movie(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Alien");
        assert!(!fetched.id.is_empty());
    }

    #[tokio::test]
    async fn test_create_is_not_idempotent() {
        let store = MemoryStore::new();

        let first = store.create_movie(alien()).await.unwrap();
        let second = store.create_movie(alien()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.list_movies().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryStore::new();
        for name in ["Mark", "Clara", "Bob"] {
            store
                .create_celebrity(NewCelebrity {
                    name: name.to_string(),
                    occupation: "Actor".to_string(),
                    catch_phrase: "...".to_string(),
                })
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_celebrities()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Mark", "Clara", "Bob"]);

        let found = store.find_celebrities(Some("ar")).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = MemoryStore::new();
        let movie = store.create_movie(alien()).await.unwrap();

        let updated = store
            .update_movie(
                &movie.id,
                NewMovie {
                    title: "Aliens".to_string(),
                    genre: "Action".to_string(),
                    plot: "This time it's war".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, movie.id);
        assert_eq!(store.get_movie(&movie.id).await.unwrap().unwrap().title, "Aliens");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let result = store.update_movie("nope", alien()).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = MemoryStore::new();
        store.delete_movie("nope").await.unwrap();
        store.delete_cast("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        let new = || NewUser {
            username: "jane".to_string(),
            password_hash: "hash".to_string(),
        };

        let user = store.create_user(new()).await.unwrap();
        let result = store.create_user(new()).await;

        assert!(matches!(result, Err(CatalogError::DuplicateUsername(_))));
        let found = store.get_user_by_username("jane").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_concurrent_registrations_keep_index_and_records_in_step() {
        let store = Arc::new(MemoryStore::new());

        let attempts: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let created = store
                        .create_user(NewUser {
                            username: "jane".to_string(),
                            password_hash: format!("hash-{i}"),
                        })
                        .await;
                    // Whoever wins or loses, the name must already resolve to a record
                    let found = store.get_user_by_username("jane").await.unwrap();
                    (created, found)
                })
            })
            .collect();

        let mut winners = Vec::new();
        for attempt in attempts {
            let (created, found) = attempt.await.unwrap();
            assert!(found.is_some());
            if let Ok(user) = created {
                winners.push(user);
            }
        }

        assert_eq!(winners.len(), 1);
        let stored = store.get_user_by_username("jane").await.unwrap().unwrap();
        assert_eq!(stored.id, winners[0].id);
    }
}
