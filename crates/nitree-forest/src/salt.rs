use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of random bytes behind each salt token.
pub const TOKEN_BYTES: usize = 32;

/// Source of URL-safe salt tokens for text leaves.
///
/// Every call must return a fresh token; a repeated or predictable token lets
/// an observer confirm guesses of low-entropy leaves.
pub trait SaltSource: Send + Sync {
    /// Draws the next token.
    fn token(&self) -> String;
}

/// Tokens of [`TOKEN_BYTES`] bytes from the operating system CSPRNG, base64url
/// encoded without padding.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSaltSource;

impl SaltSource for OsSaltSource {
    fn token(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

/// Predictable tokens `<prefix>0`, `<prefix>1`, ... for tests and fixtures.
///
/// Never use this for trees that will be shared.
#[derive(Debug, Default)]
pub struct CountingSaltSource {
    prefix: String,
    next: AtomicU64,
}

impl CountingSaltSource {
    /// Creates a source whose tokens start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl SaltSource for CountingSaltSource {
    fn token(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}
