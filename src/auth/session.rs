use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "cbx_session";

/// HMAC key for session cookies. Tokens are `username.hex(mac)`, so the
/// server stores no session state; a token is valid until the key
/// changes (restart without a configured secret).
pub struct SessionKey {
    key: Vec<u8>,
}

impl SessionKey {
    pub fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    pub fn random() -> Self {
        let mut key = [0u8; 32];
        rand::rng().fill(&mut key);
        Self { key: key.to_vec() }
    }

    /// Sign a username into a session token.
    pub fn issue(&self, username: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(username.as_bytes());
        let signature = mac.finalize().into_bytes();
        format!("{}.{}", username, hex::encode(signature))
    }

    /// Verify a token and return the username it was issued for.
    /// Anything malformed, tampered with, or signed under another key
    /// is `None`.
    pub fn verify(&self, token: &str) -> Option<String> {
        let (username, signature_hex) = token.rsplit_once('.')?;
        let signature = hex::decode(signature_hex).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(username.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(username.to_string())
    }
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token)
}

/// Set-Cookie value clearing the session on logout.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}

/// Pull the session token out of the Cookie request header.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
