//! Pollr - a bounded-retry polling executor
//!
//! Pollr makes an unreliable, latency-variable operation (canonically a
//! check against a live browser DOM) look like a single call that either
//! returns a correct result or fails deterministically after a bounded
//! time. Callers wrap the operation as a [`Query`] with its own timeout and
//! retry interval; the [`Executor`] loops, classifying each attempt's
//! failure as tolerated or fatal, until success, a fatal error, or the
//! deadline.

pub mod config;
pub mod error;
pub mod executor;
pub mod outcome;
pub mod policy;
pub mod query;

pub use error::{AttemptError, ErrorKind, PollrError, Result};
pub use executor::Executor;
pub use outcome::{Outcome, PollError};
pub use policy::{Classification, ErrorPolicy};
pub use query::{FnQuery, PollOptions, PredicateQuery, Query};
