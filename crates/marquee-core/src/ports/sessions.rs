//! Server-side login sessions

use crate::Result;
use async_trait::async_trait;

/// Maps opaque session tokens to user ids.
///
/// Tokens never expire on their own; a session ends only through
/// `destroy_session`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session for `user_id` and return its token
    async fn create_session(&self, user_id: &str) -> Result<String>;
    async fn get_session(&self, token: &str) -> Result<Option<String>>;
    async fn destroy_session(&self, token: &str) -> Result<()>;
}
