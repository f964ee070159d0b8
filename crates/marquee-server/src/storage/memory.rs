//! In-memory session store using DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use marquee_core::SessionStore;
use std::sync::Arc;

/// Login sessions keyed by token. Sessions do not expire; they live until
/// logout or process restart.
pub struct MemorySessions {
    /// token -> user id
    data: Arc<DashMap<String, String>>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    /// Number of live sessions
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl Default for MemorySessions {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn create_session(&self, user_id: &str) -> marquee_core::Result<String> {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.data.insert(token.clone(), user_id.to_string());
        Ok(token)
    }

    async fn get_session(&self, token: &str) -> marquee_core::Result<Option<String>> {
        Ok(self.data.get(token).map(|entry| entry.value().clone()))
    }

    async fn destroy_session(&self, token: &str) -> marquee_core::Result<()> {
        self.data.remove(token);
        Ok(())
    }
}
