pub mod cookie;
pub mod session;

use hmac::{Hmac, Mac};
use session::{SessionRecord, SessionStore};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Shown inline on the login view after a failed attempt.
pub const REJECTED_MESSAGE: &str = "Incorrect Password";

/// Outcome of a credential check. A wrong password is a normal outcome,
/// not an error; every render path consumes this one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthResult {
    Authenticated,
    Rejected,
}

/// Hook for lockout/attempt-counting policies. The dashboard ships with no
/// throttling; hardened deployments can plug one in here.
pub trait ThrottlePolicy: Send + Sync {
    fn allow_attempt(&self, _session_id: &str) -> bool {
        true
    }
    fn record_failure(&self, _session_id: &str) {}
}

pub struct NoThrottle;

impl ThrottlePolicy for NoThrottle {}

/// Decides whether a client may view the scorecard. Owns the per-session
/// authenticated flag; mutates nothing else.
pub struct SessionGate {
    store: Arc<dyn SessionStore>,
    throttle: Arc<dyn ThrottlePolicy>,
    password: String,
    ttl_secs: u64,
}

impl SessionGate {
    pub fn new(store: Arc<dyn SessionStore>, password: String, ttl_secs: u64) -> SessionGate {
        SessionGate::with_throttle(store, Arc::new(NoThrottle), password, ttl_secs)
    }

    pub fn with_throttle(
        store: Arc<dyn SessionStore>,
        throttle: Arc<dyn ThrottlePolicy>,
        password: String,
        ttl_secs: u64,
    ) -> SessionGate {
        SessionGate {
            store,
            throttle,
            password,
            ttl_secs,
        }
    }

    /// Compare the supplied credential against the configured secret and
    /// flip the session to authenticated on a match.
    pub fn check(&self, session_id: &str, supplied: &str) -> AuthResult {
        if !self.throttle.allow_attempt(session_id) {
            return AuthResult::Rejected;
        }
        if constant_time_eq(supplied.as_bytes(), self.password.as_bytes()) {
            self.store
                .set(session_id, SessionRecord::new(true, self.ttl_secs));
            tracing::info!(session_id, "session authenticated");
            AuthResult::Authenticated
        } else {
            self.throttle.record_failure(session_id);
            tracing::debug!(session_id, "credential rejected");
            AuthResult::Rejected
        }
    }

    /// Pure read; missing or expired sessions are unauthenticated.
    pub fn is_authenticated(&self, session_id: &str) -> bool {
        self.store
            .get(session_id)
            .map(|record| record.authenticated)
            .unwrap_or(false)
    }

    pub fn logout(&self, session_id: &str) {
        self.store.clear(session_id);
        tracing::info!(session_id, "session cleared");
    }
}

/// Constant-structure comparison: compare HMAC tags of both values under a
/// fixed key so the timing does not leak a matching prefix.
pub fn constant_time_eq(supplied: &[u8], expected: &[u8]) -> bool {
    const COMPARE_KEY: &[u8] = b"scorecard-credential-compare";
    let mut expected_mac =
        HmacSha256::new_from_slice(COMPARE_KEY).expect("hmac accepts keys of any length");
    expected_mac.update(expected);
    let expected_tag = expected_mac.finalize().into_bytes();

    let mut supplied_mac =
        HmacSha256::new_from_slice(COMPARE_KEY).expect("hmac accepts keys of any length");
    supplied_mac.update(supplied);
    supplied_mac.verify_slice(&expected_tag).is_ok()
}
