use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::{types::AccessToken, utils};

/// Identifier carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(utils::generate_session_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: AccessToken,
    pub signed_in_at: DateTime<Utc>,
}

/// In-memory token store, one slot per browser session.
///
/// Writes overwrite unconditionally and the next read returns exactly the last
/// value written for that session. No expiry, no refresh, nothing persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a fresh session holding `token` and returns its id.
    pub async fn create(&self, token: AccessToken) -> SessionId {
        let id = SessionId::generate();
        self.set(&id, token).await;
        id
    }

    pub async fn set(&self, id: &SessionId, token: AccessToken) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(
            id.clone(),
            Session {
                token,
                signed_in_at: Utc::now(),
            },
        );
    }

    pub async fn get(&self, id: &SessionId) -> Option<AccessToken> {
        let sessions = self.sessions.lock().await;
        sessions.get(id).map(|s| s.token.clone())
    }

    pub async fn session(&self, id: &SessionId) -> Option<Session> {
        self.sessions.lock().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &SessionId) -> Option<Session> {
        self.sessions.lock().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_returns_last_write() {
        let store = SessionStore::new();
        let id = SessionId::from("abc");

        assert_eq!(store.get(&id).await, None);

        for value in ["first", "second", ""] {
            store.set(&id, AccessToken::new(value)).await;
            assert_eq!(store.get(&id).await, Some(AccessToken::new(value)));
        }
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let alice = store.create(AccessToken::new("alice-token")).await;
        let bob = store.create(AccessToken::new("bob-token")).await;

        assert_ne!(alice, bob);
        assert_eq!(store.get(&alice).await, Some(AccessToken::new("alice-token")));
        assert_eq!(store.get(&bob).await, Some(AccessToken::new("bob-token")));

        store.set(&bob, AccessToken::new("bob-again")).await;
        assert_eq!(store.get(&alice).await, Some(AccessToken::new("alice-token")));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new();
        let id = store.create(AccessToken::new("t")).await;

        assert!(store.remove(&id).await.is_some());
        assert_eq!(store.get(&id).await, None);
        assert_eq!(store.len().await, 0);
    }
}
