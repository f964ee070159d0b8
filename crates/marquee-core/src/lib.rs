//! Marquee Core Library
//!
//! Storage ports, the relationship resolver and text search for the catalog.

// Re-export pure types from marquee-types
pub use marquee_types::*;

pub mod cast;
pub mod error;
pub mod memory;
pub mod ports;
pub mod resolver;
pub mod search;

pub use error::{CatalogError, Result};
pub use memory::MemoryStore;
pub use ports::{CastStore, CatalogStore, CelebrityStore, MovieStore, SessionStore, UserStore};
