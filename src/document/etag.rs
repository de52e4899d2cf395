//! Etag - per-mutation document version token
//!
//! Every write issues a fresh 96-bit token:
//!
//! - 4 bytes: big-endian UNIX seconds at generation
//! - 5 bytes: per-process random component
//! - 3 bytes: big-endian wrapping counter, randomly seeded at startup
//!
//! The layout guarantees uniqueness per mutation without coordination: two
//! tokens from one process differ in the counter, tokens from different
//! processes differ in the random component. Tokens render as 24 lowercase
//! hex characters and are stored in documents as JSON strings.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::Utc;
use rand::RngCore;
use serde_json::Value;
use thiserror::Error;

/// A version token is not a well-formed 24-char hex string
#[derive(Debug, Clone, Error)]
#[error("invalid etag {0:?}: expected 24 hex characters")]
pub struct EtagParseError(String);

/// An opaque, globally unique document version token.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Etag([u8; 12]);

/// Process-wide token material, initialized once.
struct Generator {
    random: [u8; 5],
    counter: AtomicU32,
}

fn generator() -> &'static Generator {
    static GENERATOR: OnceLock<Generator> = OnceLock::new();
    GENERATOR.get_or_init(|| {
        let mut rng = rand::thread_rng();
        let mut random = [0u8; 5];
        rng.fill_bytes(&mut random);
        Generator {
            random,
            counter: AtomicU32::new(rng.next_u32()),
        }
    })
}

impl Etag {
    /// Issues a fresh token, distinct from every token issued before it.
    pub fn new() -> Self {
        let generator = generator();
        let seconds = Utc::now().timestamp() as u32;
        let count = generator.counter.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&generator.random);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        Etag(bytes)
    }

    /// Returns the raw token bytes.
    pub fn bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// The token as it is stored inside a document.
    pub fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Default for Etag {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Etag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Etag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Etag({})", self)
    }
}

impl FromStr for Etag {
    type Err = EtagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 24 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EtagParseError(s.to_string()));
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16)
                .map_err(|_| EtagParseError(s.to_string()))?;
        }
        Ok(Etag(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tokens_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(Etag::new()));
        }
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let etag = Etag::new();
        let rendered = etag.to_string();
        assert_eq!(rendered.len(), 24);
        assert!(rendered.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(rendered.parse::<Etag>().unwrap(), etag);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<Etag>().is_err());
        assert!("zzzzzzzzzzzzzzzzzzzzzzzz".parse::<Etag>().is_err());
        assert!("abc".parse::<Etag>().is_err());
        // 23 and 25 chars
        assert!("0123456789abcdef0123456".parse::<Etag>().is_err());
        assert!("0123456789abcdef012345678".parse::<Etag>().is_err());
    }

    #[test]
    fn test_known_bytes_render() {
        let etag: Etag = "000000010203040506070809".parse().unwrap();
        assert_eq!(
            etag.bytes(),
            &[0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9]
        );
        assert_eq!(etag.to_string(), "000000010203040506070809");
    }

    #[test]
    fn test_to_value_is_string() {
        let etag = Etag::new();
        assert_eq!(etag.to_value(), Value::String(etag.to_string()));
    }

    #[test]
    fn test_shared_random_component() {
        // tokens from the same process share bytes 4..9
        let a = Etag::new();
        let b = Etag::new();
        assert_eq!(a.bytes()[4..9], b.bytes()[4..9]);
        assert_ne!(a, b);
    }
}
