//! Session identifiers with self-describing option bits
//!
//! A session identifier is a random v4 UUID with two bits repurposed to
//! carry session-level options (transacted, causally consistent). Because
//! the options live inside the identifier itself, no side lookup table is
//! needed: any holder of the identifier can decode them.

mod options;
mod sid;

pub use options::{SessionOptions, CAUSALLY_CONSISTENT_FLAG, TXN_FLAG};
pub use sid::Sid;
