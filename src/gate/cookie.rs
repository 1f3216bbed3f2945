use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "scorecard_session";

pub fn new_session_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Cookie value is `<id>.<hmac-sha256-hex(id)>` keyed by the configured
/// signing secret.
pub fn sign(session_id: &str, secret_key: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .expect("hmac accepts keys of any length");
    mac.update(session_id.as_bytes());
    let tag = hex::encode(mac.finalize().into_bytes());
    format!("{session_id}.{tag}")
}

/// Verify a cookie value and return the session id. Anything malformed or
/// mis-signed reads as "no session".
pub fn verify(cookie_value: &str, secret_key: &str) -> Option<String> {
    let (session_id, tag_hex) = cookie_value.split_once('.')?;
    if session_id.is_empty() {
        return None;
    }
    let tag = hex::decode(tag_hex).ok()?;
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .expect("hmac accepts keys of any length");
    mac.update(session_id.as_bytes());
    // verify_slice is constant-time.
    mac.verify_slice(&tag).ok()?;
    Some(session_id.to_string())
}

/// Extract and verify the session id from request headers.
pub fn session_id_from_headers(headers: &HeaderMap, secret_key: &str) -> Option<String> {
    for header in headers.get_all(axum::http::header::COOKIE) {
        // A header that is not valid UTF-8 cannot hold our cookie; keep
        // scanning the remaining Cookie headers.
        let Ok(raw) = header.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE {
                    return verify(value, secret_key);
                }
            }
        }
    }
    None
}

pub fn set_cookie_value(signed: &str, max_age_secs: u64) -> String {
    format!("{SESSION_COOKIE}={signed}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

pub fn clear_cookie_value() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
