//! racecache - cache versus store lookup race
//!
//! Resolves keys by racing a fast, possibly cold in-memory cache against a
//! slower authoritative store. Store hits are written through to the cache
//! so later lookups of the same key are answered locally.

pub mod cache;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod race;
pub mod record;
pub mod store;
pub mod ui;

pub use error::{RaceError, RaceResult};
