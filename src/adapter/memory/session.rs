use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::app_error::AppResult;
use crate::application::interface::gateway::session::SessionStore;
use crate::domain::entities::id::Id;
use crate::domain::entities::session::Session;

struct Entry {
    session: Session,
    expires_at: DateTime<Utc>,
}

/// Process-local session store. Each key is last-write-wins.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<Uuid, Entry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &Id<Session>) -> AppResult<Option<Session>> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(&session_id.value) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.session.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }
        // expired: drop it, unless it was refreshed in between
        let mut entries = self.entries.write().await;
        if entries.get(&session_id.value).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(&session_id.value);
        }
        Ok(None)
    }

    async fn set(&self, session: &Session, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            session: session.clone(),
            expires_at: Utc::now() + ttl,
        };
        self.entries.write().await.insert(session.id.value, entry);
        Ok(())
    }

    async fn delete(&self, session_id: &Id<Session>) -> AppResult<()> {
        self.entries.write().await.remove(&session_id.value);
        Ok(())
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::session::UserRef;
    use rstest::{fixture, rstest};

    #[fixture]
    fn session() -> Session {
        Session::anonymous(Utc::now())
    }

    #[rstest]
    #[tokio::test]
    async fn test_set_then_get(session: Session) {
        let store = MemorySessionStore::new();
        store.set(&session, Duration::seconds(60)).await.unwrap();

        let found = store.get(&session.id).await.unwrap();
        assert_eq!(found, Some(session));
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_unknown_is_none(session: Session) {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(&session.id).await.unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_expired_entry_is_invisible_and_dropped(session: Session) {
        let store = MemorySessionStore::new();
        store.set(&session, Duration::zero()).await.unwrap();

        assert_eq!(store.get(&session.id).await.unwrap(), None);
        assert_eq!(store.count().await, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_set_overwrites_last_write_wins(mut session: Session) {
        let store = MemorySessionStore::new();
        store.set(&session, Duration::seconds(60)).await.unwrap();

        session.user = Some(UserRef {
            id: Id::generate(),
            email: "jane@example.com".to_string(),
            display_name: "Jane".to_string(),
        });
        store.set(&session, Duration::seconds(60)).await.unwrap();

        let found = store.get(&session.id).await.unwrap().unwrap();
        assert!(found.is_authenticated());
        assert_eq!(store.count().await, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete(session: Session) {
        let store = MemorySessionStore::new();
        store.set(&session, Duration::seconds(60)).await.unwrap();
        store.delete(&session.id).await.unwrap();

        assert_eq!(store.get(&session.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_entries() {
        let store = MemorySessionStore::new();
        let live = Session::anonymous(Utc::now());
        store.set(&live, Duration::seconds(60)).await.unwrap();
        for _ in 0..3 {
            store.set(&Session::anonymous(Utc::now()), Duration::zero()).await.unwrap();
        }

        assert_eq!(store.purge_expired().await.unwrap(), 3);
        assert_eq!(store.count().await, 1);
        assert!(store.get(&live.id).await.unwrap().is_some());
    }
}
