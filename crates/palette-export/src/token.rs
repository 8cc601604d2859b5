//! Per-click, single-purpose tokens for the export link.
//!
//! A token is the truncated HMAC-SHA256 of the current time window and the
//! action name it was issued for. Verification recomputes the MAC for the
//! current and the previous window, so a token stays valid for one to two
//! half-lives (12–24 hours at the default lifetime) and then fails closed.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use palette_common::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Action name the export token is bound to.
pub const EXPORT_ACTION: &str = "gppro_css_export_nonce";

/// Token length in lowercase hex characters (8 MAC bytes).
const TOKEN_HEX_LEN: usize = 16;

const DEFAULT_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Issues and verifies time-windowed action tokens under one secret key.
pub struct TokenService {
    key: [u8; 32],
    lifetime: Duration,
}

// ---------------------------------------------------------------------------
// Persistence helpers
// ---------------------------------------------------------------------------

#[derive(serde::Serialize, serde::Deserialize)]
struct KeyFile {
    version: u32,
    key_b64: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl TokenService {
    /// Service with the default 24-hour token lifetime.
    pub fn new(key: [u8; 32]) -> Self {
        Self::with_lifetime(key, DEFAULT_LIFETIME)
    }

    /// Service with an explicit token lifetime. The lifetime must be at
    /// least two seconds so the half-life window is non-zero.
    pub fn with_lifetime(key: [u8; 32], lifetime: Duration) -> Self {
        let lifetime = lifetime.max(Duration::from_secs(2));
        Self { key, lifetime }
    }

    /// Service with a freshly generated random key.
    pub fn generate() -> Self {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        Self::new(key)
    }

    /// Load the key from `path`, or generate a new one and save it.
    pub fn load_or_generate(path: &Path) -> Result<Self, TokenError> {
        if path.exists() {
            match Self::load(path) {
                Ok(svc) => return Ok(svc),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load token key, generating new one");
                }
            }
        }
        let svc = Self::generate();
        svc.save(path)?;
        Ok(svc)
    }

    /// Issue a token bound to `action` for the window containing `now`.
    pub fn issue(&self, action: &str, now: SystemTime) -> String {
        hex_encode(&self.tag(self.tick(now), action))
    }

    /// Verify a token against `action` at time `now`.
    ///
    /// The MAC comparison is constant-time. Malformed, expired, and
    /// wrong-action tokens are all equally invalid.
    pub fn verify(&self, token: &str, action: &str, now: SystemTime) -> bool {
        let presented = match hex_decode(token) {
            Some(bytes) if token.len() == TOKEN_HEX_LEN => bytes,
            _ => return false,
        };

        let tick = self.tick(now);
        if self.mac(tick, action).verify_truncated_left(&presented).is_ok() {
            return true;
        }
        tick > 0
            && self
                .mac(tick - 1, action)
                .verify_truncated_left(&presented)
                .is_ok()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

impl TokenService {
    /// Window index for `now`. Windows advance every half-life, so a token
    /// matches its own window and the one after it.
    fn tick(&self, now: SystemTime) -> u64 {
        let secs = now
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        secs / (self.lifetime.as_secs() / 2)
    }

    fn mac(&self, tick: u64, action: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(format!("{tick}|{action}").as_bytes());
        mac
    }

    fn tag(&self, tick: u64, action: &str) -> Vec<u8> {
        let digest = self.mac(tick, action).finalize().into_bytes();
        digest[..TOKEN_HEX_LEN / 2].to_vec()
    }

    fn load(path: &Path) -> Result<Self, TokenError> {
        let data = std::fs::read_to_string(path).map_err(|e| ke(&e))?;
        let file: KeyFile = serde_json::from_str(&data).map_err(|e| ke(&e))?;
        if file.version != 1 {
            return Err(TokenError::UnsupportedVersion(file.version));
        }
        let bytes = B64.decode(&file.key_b64).map_err(|e| ke(&e))?;
        let key: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TokenError::KeyError("key is not 32 bytes".into()))?;
        Ok(Self::new(key))
    }

    fn save(&self, path: &Path) -> Result<(), TokenError> {
        let file = KeyFile {
            version: 1,
            key_b64: B64.encode(self.key),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| ke(&e))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ke(&e))?;
        }

        // Write with restricted permissions on Unix
        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut opts = std::fs::OpenOptions::new();
            opts.write(true).create(true).truncate(true).mode(0o600);
            let mut f = opts.open(path).map_err(|e| ke(&e))?;
            f.write_all(json.as_bytes()).map_err(|e| ke(&e))?;
        }
        #[cfg(not(unix))]
        {
            std::fs::write(path, &json).map_err(|e| ke(&e))?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if !s.is_ascii() || s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

/// Shorthand to convert any Display error into TokenError::KeyError.
fn ke(e: &dyn std::fmt::Display) -> TokenError {
    TokenError::KeyError(e.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn service() -> TokenService {
        TokenService::new([7u8; 32])
    }

    #[test]
    fn token_is_lowercase_hex() {
        let token = service().issue(EXPORT_ACTION, at(1_700_000_000));
        assert_eq!(token.len(), 16);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn verifies_at_issue_time() {
        let svc = service();
        let now = at(1_700_000_000);
        let token = svc.issue(EXPORT_ACTION, now);
        assert!(svc.verify(&token, EXPORT_ACTION, now));
    }

    #[test]
    fn verifies_one_half_life_later() {
        let svc = service();
        let now = at(1_700_000_000);
        let token = svc.issue(EXPORT_ACTION, now);
        let later = at(1_700_000_000 + 12 * 60 * 60);
        assert!(svc.verify(&token, EXPORT_ACTION, later));
    }

    #[test]
    fn expires_after_two_half_lives() {
        let svc = service();
        let now = at(1_700_000_000);
        let token = svc.issue(EXPORT_ACTION, now);
        let later = at(1_700_000_000 + 24 * 60 * 60);
        assert!(!svc.verify(&token, EXPORT_ACTION, later));
    }

    #[test]
    fn rejects_wrong_action() {
        let svc = service();
        let now = at(1_700_000_000);
        let token = svc.issue(EXPORT_ACTION, now);
        assert!(!svc.verify(&token, "some_other_action", now));
    }

    #[test]
    fn rejects_wrong_key() {
        let now = at(1_700_000_000);
        let token = service().issue(EXPORT_ACTION, now);
        let other = TokenService::new([9u8; 32]);
        assert!(!other.verify(&token, EXPORT_ACTION, now));
    }

    #[test]
    fn rejects_malformed_tokens() {
        let svc = service();
        let now = at(1_700_000_000);
        assert!(!svc.verify("", EXPORT_ACTION, now));
        assert!(!svc.verify("zzzzzzzzzzzzzzzz", EXPORT_ACTION, now));
        assert!(!svc.verify("abc", EXPORT_ACTION, now));
        assert!(!svc.verify("0123456789abcdef00", EXPORT_ACTION, now));
        assert!(!svc.verify("éééééééé", EXPORT_ACTION, now));
    }

    #[test]
    fn custom_lifetime_shrinks_window() {
        let svc = TokenService::with_lifetime([7u8; 32], Duration::from_secs(60));
        let now = at(1_700_000_000);
        let token = svc.issue(EXPORT_ACTION, now);
        assert!(svc.verify(&token, EXPORT_ACTION, at(1_700_000_000 + 30)));
        assert!(!svc.verify(&token, EXPORT_ACTION, at(1_700_000_000 + 60)));
    }

    #[test]
    fn key_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("token-key.json");

        let svc1 = TokenService::load_or_generate(&path).unwrap();
        let now = at(1_700_000_000);
        let token = svc1.issue(EXPORT_ACTION, now);

        let svc2 = TokenService::load_or_generate(&path).unwrap();
        assert!(svc2.verify(&token, EXPORT_ACTION, now));
    }

    #[test]
    fn corrupt_key_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token-key.json");
        std::fs::write(&path, "not json").unwrap();

        let svc = TokenService::load_or_generate(&path).unwrap();
        let now = at(1_700_000_000);
        let token = svc.issue(EXPORT_ACTION, now);
        assert!(svc.verify(&token, EXPORT_ACTION, now));

        // The replacement key must have been written back out.
        let reloaded = TokenService::load_or_generate(&path).unwrap();
        assert!(reloaded.verify(&token, EXPORT_ACTION, now));
    }
}
