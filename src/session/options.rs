//! Session option flags

use serde::{Deserialize, Serialize};

/// Bit flagging a transacted session: `0010 0000`
pub const TXN_FLAG: u8 = 0x20;

/// Bit flagging a causally consistent session: `0001 0000`
pub const CAUSALLY_CONSISTENT_FLAG: u8 = 0x10;

/// Out-of-band session properties carried inside the session identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Session runs inside a transaction
    pub transacted: bool,
    /// Session reads are causally consistent
    pub causally_consistent: bool,
}

impl SessionOptions {
    /// Creates a session options pair
    pub fn new(transacted: bool, causally_consistent: bool) -> Self {
        Self {
            transacted,
            causally_consistent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_avoid_variant_bits() {
        // the two most significant bits of the flag byte carry the UUID
        // variant and must stay untouched
        assert_eq!(TXN_FLAG & 0b1100_0000, 0);
        assert_eq!(CAUSALLY_CONSISTENT_FLAG & 0b1100_0000, 0);
        assert_eq!(TXN_FLAG & CAUSALLY_CONSISTENT_FLAG, 0);
    }

    #[test]
    fn test_default_is_all_clear() {
        let options = SessionOptions::default();
        assert!(!options.transacted);
        assert!(!options.causally_consistent);
    }
}
