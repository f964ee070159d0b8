//! Port traits (interfaces) for dependency injection

pub mod sessions;
pub mod storage;

pub use sessions::SessionStore;
pub use storage::{CastStore, CatalogStore, CelebrityStore, MovieStore, UserStore};
