//! Sid - session identifier with embedded option flags
//!
//! UUID format:
//!
//! ```text
//! 123e4567-e89b-42d3-a456-556642440000
//! xxxxxxxx-xxxx-Bxxx-Axxx-xxxxxxxxxxxx
//! ```
//!
//! The flags live in byte A, the most significant byte of the least
//! significant 64 bits (byte 8 of the buffer). Its two most significant
//! bits are reserved for the UUID variant; the next two are overwritten
//! with the transacted (`0x20`) and causally consistent (`0x10`) flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::options::{SessionOptions, CAUSALLY_CONSISTENT_FLAG, TXN_FLAG};

/// A session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sid(Uuid);

impl Sid {
    /// A type 4 (pseudo randomly generated) session identifier, from a
    /// cryptographically strong random source, with no flags set.
    pub fn random() -> Self {
        Sid(Uuid::new_v4())
    }

    /// A random session identifier carrying the given options.
    ///
    /// The randomness is weakened by exactly the two flag bits.
    pub fn with_options(options: SessionOptions) -> Self {
        let mut bytes = *Uuid::new_v4().as_bytes();
        set_flag(&mut bytes[8], TXN_FLAG, options.transacted);
        set_flag(&mut bytes[8], CAUSALLY_CONSISTENT_FLAG, options.causally_consistent);
        Sid(Uuid::from_bytes(bytes))
    }

    /// Decodes the options embedded in this identifier.
    pub fn session_options(&self) -> SessionOptions {
        let flags = self.0.as_bytes()[8];
        SessionOptions {
            transacted: flags & TXN_FLAG == TXN_FLAG,
            causally_consistent: flags & CAUSALLY_CONSISTENT_FLAG == CAUSALLY_CONSISTENT_FLAG,
        }
    }

    /// The identifier as a plain UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

fn set_flag(byte: &mut u8, flag: u8, value: bool) {
    if value {
        *byte |= flag;
    } else {
        *byte &= !flag;
    }
}

impl From<Uuid> for Sid {
    fn from(uuid: Uuid) -> Self {
        Sid(uuid)
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Sid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Sid(Uuid::from_str(s)?))
    }
}
