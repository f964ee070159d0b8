//! Storage layer
//!
//! Uses SQLite (embedded) for the catalog and users.
//! Uses DashMap (in-memory) for login sessions.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemorySessions;
