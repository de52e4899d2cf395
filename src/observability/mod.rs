//! Structured event logging for mutation outcomes
//!
//! The repository emits one JSON line per noteworthy event: conflicts,
//! compensating restores, bulk write summaries.
//!
//! # Principles
//!
//! 1. One log line = one event
//! 2. Deterministic key ordering
//! 3. Synchronous, no buffering, no background threads
//! 4. Logging never affects the operation outcome

mod logger;

pub use logger::{Logger, Severity};

#[cfg(test)]
pub(crate) use logger::capture;
