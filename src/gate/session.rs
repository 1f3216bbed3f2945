use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-client session record. Owned by the Session Gate; everything else
/// only reads the authenticated flag through the gate.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub authenticated: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(authenticated: bool, ttl_secs: u64) -> SessionRecord {
        let now = Utc::now();
        // An oversized TTL saturates to the far future instead of panicking:
        // try_seconds rejects values chrono cannot represent, and the add
        // can overflow the datetime range.
        let ttl = Duration::try_seconds(ttl_secs.min(i64::MAX as u64) as i64)
            .unwrap_or(Duration::MAX);
        SessionRecord {
            authenticated,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Explicit session-store seam, keyed by session id. Replaces the ambient
/// per-process session globals of earlier revisions of this dashboard.
pub trait SessionStore: Send + Sync {
    fn get(&self, session_id: &str) -> Option<SessionRecord>;
    fn set(&self, session_id: &str, record: SessionRecord);
    fn clear(&self, session_id: &str);
}

/// In-process store with fixed-TTL expiry. Expired records read as absent
/// and are purged on access.
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> MemorySessionStore {
        MemorySessionStore {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, session_id: &str) -> Option<SessionRecord> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        match sessions.get(session_id) {
            Some(record) if record.expired_at(Utc::now()) => {
                sessions.remove(session_id);
                None
            }
            Some(record) => Some(record.clone()),
            None => None,
        }
    }

    fn set(&self, session_id: &str, record: SessionRecord) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.insert(session_id.to_string(), record);
    }

    fn clear(&self, session_id: &str) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.remove(session_id);
    }
}
