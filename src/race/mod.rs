//! Cache-versus-store lookup race
//!
//! Each lookup runs a cache probe and a store probe concurrently. The first
//! probe to find the record wins and is reported to the sink; the other
//! probe is still awaited so no task outlives its request.
//!
//! # Outcomes
//!
//! | Cache | Store | Result |
//! |-------|-------|--------|
//! | hit | (any) | cache or store, whichever finished first |
//! | miss | hit | store |
//! | miss | miss | not found |
//! | miss | error | error |

pub mod arbiter;
pub mod trace;
pub mod types;

pub use arbiter::{Arbiter, ProbeStats};
pub use trace::{MemorySink, ResultSink, Trace};
pub use types::{LookupRequest, Origin, ProbeOutcome, Resolution};
