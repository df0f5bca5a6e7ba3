use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain::{
    repositories::sessions::SessionStore,
    value_objects::sessions::{Session, SessionUser},
};
use rand::{RngCore, rngs::OsRng};
use tokio::sync::Mutex;
use tracing::debug;

const TOKEN_BYTES: usize = 32;

/// Process-local session table. Sessions do not survive a restart.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }
}

fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user: SessionUser) -> Result<Session> {
        let now = Utc::now();
        let session = Session {
            session_id: random_token(),
            csrf_token: random_token(),
            user,
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.session_id.clone(), session.clone());
        debug!(user_id = %session.user.user_id, "sessions: created");

        Ok(session)
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        let mut sessions = self.sessions.lock().await;

        let expired = match sessions.get(session_id) {
            Some(session) if !session.is_expired_at(Utc::now()) => {
                return Ok(Some(session.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            sessions.remove(session_id);
        }
        Ok(None)
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        self.sessions.lock().await.remove(session_id);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok(before - sessions.len())
    }
}
