//! Per-session review stores

use feedcheck_review::ReviewStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Handle to one session's store; interactions on a session run one at a time
pub type SessionHandle = Arc<Mutex<ReviewStore>>;

struct SessionEntry {
    store: SessionHandle,
    last_used: Instant,
}

/// Live sessions, bounded by `max_sessions`
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Open a new session with an empty store
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write();

        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::info!(session = %oldest, "evicted least recently used session");
        }

        sessions.insert(
            id,
            SessionEntry {
                store: Arc::new(Mutex::new(ReviewStore::new())),
                last_used: Instant::now(),
            },
        );
        tracing::debug!(session = %id, live = sessions.len(), "session created");
        id
    }

    /// Look up a session and mark it used
    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write();
        let entry = sessions.get_mut(id)?;
        entry.last_used = Instant::now();
        Some(entry.store.clone())
    }

    /// End a session, dropping its state
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            tracing::debug!(session = %id, "session ended");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_get_remove() {
        let registry = SessionRegistry::new(4);
        let id = registry.create();

        assert!(registry.get(&id).is_some());
        assert!(registry.remove(&id));
        assert!(registry.get(&id).is_none());
        assert!(!registry.remove(&id));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let registry = SessionRegistry::new(2);
        let first = registry.create();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = registry.create();
        std::thread::sleep(std::time::Duration::from_millis(2));

        // Touch the first so the second becomes the oldest
        registry.get(&first);
        let third = registry.create();

        assert_eq!(registry.len(), 2);
        assert!(registry.get(&first).is_some());
        assert!(registry.get(&second).is_none());
        assert!(registry.get(&third).is_some());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new(4);
        let a = registry.create();
        let b = registry.create();

        {
            let store = registry.get(&a).unwrap();
            let mut store = store.lock().await;
            assert!(store.append(feedcheck_core::FeedbackRecord {
                id: 1,
                text: "x".to_string(),
                language: feedcheck_core::Language::English,
                classification: feedcheck_core::Classification::Genuine,
                confidence: "90%".to_string(),
                sentiment: feedcheck_core::Sentiment::Neutral,
                polarity: "0.00".to_string(),
                timestamp: "2024-01-01 00:00".to_string(),
            }));
        }

        assert_eq!(registry.get(&a).unwrap().lock().await.len(), 1);
        assert!(registry.get(&b).unwrap().lock().await.is_empty());
    }
}
