use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use passage_core::{RefreshToken, SessionStore, SessionStoreError, UserId};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: UserId,
    expires_at: Instant,
}

impl SessionEntry {
    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// In-memory session store. An expired entry is treated as absent; expired
/// entries are swept on every `put`, so abandoned tokens do not accumulate.
#[derive(Debug, Default, Clone)]
pub struct HashMapSessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
}

impl HashMapSessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for HashMapSessionStore {
    async fn put(
        &self,
        token: &RefreshToken,
        user_id: &UserId,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| SessionStoreError::DatabaseError("ttl out of range".to_string()))?;

        self.sessions.retain(|_, entry| entry.is_live());
        self.sessions.insert(
            token.as_str().to_owned(),
            SessionEntry {
                user_id: *user_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete_if_present(
        &self,
        token: &RefreshToken,
    ) -> Result<Option<UserId>, SessionStoreError> {
        // DashMap::remove holds the shard lock, so one caller wins per key.
        Ok(self
            .sessions
            .remove(token.as_str())
            .map(|(_, entry)| entry)
            .filter(SessionEntry::is_live)
            .map(|entry| entry.user_id))
    }

    async fn exists(&self, token: &RefreshToken) -> Result<bool, SessionStoreError> {
        let live = self
            .sessions
            .get(token.as_str())
            .is_some_and(|entry| entry.is_live());
        if !live {
            self.sessions
                .remove_if(token.as_str(), |_, entry| !entry.is_live());
        }
        Ok(live)
    }
}
