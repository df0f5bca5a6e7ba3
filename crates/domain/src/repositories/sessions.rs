use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;

use crate::value_objects::sessions::{Session, SessionUser};

/// Server-side session table keyed by session ID.
#[automock]
#[async_trait]
pub trait SessionStore {
    /// Issues fresh session and CSRF tokens for `user`.
    async fn create(&self, user: SessionUser) -> Result<Session>;
    /// Expired sessions are reported as absent.
    async fn get(&self, session_id: &str) -> Result<Option<Session>>;
    async fn delete(&self, session_id: &str) -> Result<()>;
    /// Returns how many sessions were dropped.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize>;
}
