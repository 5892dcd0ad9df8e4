use std::time::Duration;

use passage_core::{RefreshToken, SessionStore, SessionStoreError, UserId};
use redis::{AsyncCommands, aio::MultiplexedConnection};

/// Session store over a multiplexed async connection. Clones share the one
/// underlying connection, so every call gets its own handle without locking.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(
        &self,
        token: &RefreshToken,
        user_id: &UserId,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let key = get_key(token.as_str());
        // PX rejects 0, so sub-millisecond ttls round up.
        let ttl_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);

        let mut conn = self.conn.clone();
        conn.pset_ex::<_, _, ()>(key, user_id.to_string(), ttl_millis)
            .await
            .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))
    }

    async fn delete_if_present(
        &self,
        token: &RefreshToken,
    ) -> Result<Option<UserId>, SessionStoreError> {
        let key = get_key(token.as_str());

        // GETDEL reads and removes in one command, so only one caller sees the value.
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GETDEL")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))?;

        value
            .map(|raw| {
                UserId::parse(&raw).map_err(|e| SessionStoreError::DatabaseError(e.to_string()))
            })
            .transpose()
    }

    async fn exists(&self, token: &RefreshToken) -> Result<bool, SessionStoreError> {
        let key = get_key(token.as_str());
        let mut conn = self.conn.clone();
        conn.exists::<_, bool>(&key)
            .await
            .map_err(|e| SessionStoreError::DatabaseError(e.to_string()))
    }
}

const SESSION_KEY_PREFIX: &str = "session:";

fn get_key(token: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, token)
}
