//! Query abstraction - the retryable operation contract.
//!
//! A query is a thing that can be tried repeatedly, that knows what success
//! looks like and how long it may keep trying. Value queries produce a typed
//! result; predicate queries are the boolean specialization, served by the
//! same executor code path through [`PredicateAdapter`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::AttemptError;

mod func;

pub use func::FnQuery;

/// Timeout and retry spacing for one execution.
///
/// Immutable for the lifetime of an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOptions {
    /// Maximum wall-clock duration the executor may spend retrying
    pub timeout: Duration,
    /// Minimum pause between consecutive attempts
    pub retry_interval: Duration,
}

impl Default for PollOptions {
    /// Default: 1s timeout, 50ms retry interval.
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            retry_interval: Duration::from_millis(50),
        }
    }
}

impl PollOptions {
    /// Create options with an explicit timeout and retry interval.
    pub fn new(timeout: Duration, retry_interval: Duration) -> Self {
        Self {
            timeout,
            retry_interval,
        }
    }

    /// Zero timeout: the execution gets exactly one attempt.
    pub fn immediate() -> Self {
        Self {
            timeout: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry interval.
    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }
}

/// A retryable operation producing a typed value.
///
/// The executor is written against this contract only: one attempt, a
/// success test, and the timing budget. `attempt` is free to have arbitrary
/// side effects per call (contacting a browser, a network service, ...);
/// implementations hold no retry state of their own, so a query can be
/// executed any number of times sequentially.
#[async_trait]
pub trait Query: Send + Sync {
    /// Value produced by one attempt.
    type Output: fmt::Debug + Send;

    /// Run one attempt against the external system.
    async fn attempt(&self) -> Result<Self::Output, AttemptError>;

    /// Whether a produced value counts as success.
    ///
    /// Default: any non-erroring return.
    fn is_match(&self, _value: &Self::Output) -> bool {
        true
    }

    /// The query's own timeout and retry interval.
    fn options(&self) -> PollOptions {
        PollOptions::default()
    }
}

/// A retryable check producing a boolean.
///
/// Success is the boolean equaling [`expected`](PredicateQuery::expected)
/// (default `true`). [`PredicateAdapter`] gives any predicate query the
/// [`Query`] interface with `Output = bool`, so the executor needs no
/// separate code path for the boolean variant.
#[async_trait]
pub trait PredicateQuery: Send + Sync {
    /// Run one check against the external system.
    async fn predicate(&self) -> Result<bool, AttemptError>;

    /// The boolean that counts as success.
    fn expected(&self) -> bool {
        true
    }

    /// The check's own timeout and retry interval.
    fn options(&self) -> PollOptions {
        PollOptions::default()
    }
}

/// Adapter giving a [`PredicateQuery`] the [`Query`] interface.
pub struct PredicateAdapter<'a, P> {
    inner: &'a P,
}

impl<'a, P: PredicateQuery> PredicateAdapter<'a, P> {
    /// Wrap a predicate query for execution as a boolean-valued query.
    pub fn new(inner: &'a P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<'a, P: PredicateQuery> Query for PredicateAdapter<'a, P> {
    type Output = bool;

    async fn attempt(&self) -> Result<bool, AttemptError> {
        self.inner.predicate().await
    }

    fn is_match(&self, value: &bool) -> bool {
        *value == self.inner.expected()
    }

    fn options(&self) -> PollOptions {
        self.inner.options()
    }
}
