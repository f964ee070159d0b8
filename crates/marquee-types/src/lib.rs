//! Marquee Types - Pure type definitions for the catalog
//!
//! Entities, form payloads and field validation. No async runtime or
//! storage dependencies live here.

pub mod catalog;
pub mod form;
pub mod user;

pub use catalog::*;
pub use form::*;
pub use user::*;
