//! Lookup driver
//!
//! Issues a paced sequence of lookups, each resolved concurrently by the
//! arbiter, and waits for every one of them before returning.

pub mod keys;
pub mod runner;

pub use keys::{FixedKeys, KeyGenerator, RandomKeys};
pub use runner::{Driver, RunSummary};
