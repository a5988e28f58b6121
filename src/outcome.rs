//! Terminal results of one execution.
//!
//! [`Outcome`] is the success side; [`PollError`] the failure side. Both
//! carry attempt-count and elapsed-time diagnostics so a failure report can
//! distinguish "too short a timeout" from "operation is simply broken".

use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::error::AttemptError;

/// Successful execution: the matching value plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    /// The value produced by the final, matching attempt
    pub value: T,
    /// Number of attempts made, including the successful one
    pub attempts: u32,
    /// Wall-clock time from first attempt to completion
    pub elapsed: Duration,
}

impl<T> Outcome<T> {
    /// Assemble an outcome from loop-local executor state.
    pub fn new(value: T, attempts: u32, elapsed: Duration) -> Self {
        Self {
            value,
            attempts,
            elapsed,
        }
    }
}

/// Terminal failure of one execution.
///
/// The two timeout variants are distinct so callers can diagnose *why* the
/// operation never succeeded: the query kept raising a tolerated error, or
/// it kept producing a value that never matched.
#[derive(Debug, Error)]
pub enum PollError<T: fmt::Debug> {
    /// A non-retryable error, propagated immediately without waiting out
    /// the remaining time budget.
    #[error("fatal error after {attempts} attempt(s) in {elapsed:?}: {source}")]
    Fatal {
        #[source]
        source: AttemptError,
        attempts: u32,
        elapsed: Duration,
    },

    /// Deadline reached while attempts kept raising a tolerated error.
    #[error("timed out after {attempts} attempt(s) in {elapsed:?}; last error: {source}")]
    TimedOutWithError {
        #[source]
        source: AttemptError,
        attempts: u32,
        elapsed: Duration,
    },

    /// Deadline reached while the query kept producing a non-matching value.
    #[error("timed out after {attempts} attempt(s) in {elapsed:?}; last value: {last:?}")]
    TimedOutWithValue {
        last: T,
        attempts: u32,
        elapsed: Duration,
    },
}

impl<T: fmt::Debug> PollError<T> {
    /// Number of attempts made before the execution ended.
    pub fn attempts(&self) -> u32 {
        match self {
            PollError::Fatal { attempts, .. }
            | PollError::TimedOutWithError { attempts, .. }
            | PollError::TimedOutWithValue { attempts, .. } => *attempts,
        }
    }

    /// Wall-clock time from first attempt to the terminal condition.
    pub fn elapsed(&self) -> Duration {
        match self {
            PollError::Fatal { elapsed, .. }
            | PollError::TimedOutWithError { elapsed, .. }
            | PollError::TimedOutWithValue { elapsed, .. } => *elapsed,
        }
    }

    /// Whether the execution ended on a fatal classification.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PollError::Fatal { .. })
    }

    /// Whether the execution ended by deadline exhaustion.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            PollError::TimedOutWithError { .. } | PollError::TimedOutWithValue { .. }
        )
    }

    /// The last raised attempt error, if the execution ended in one.
    pub fn last_error(&self) -> Option<&AttemptError> {
        match self {
            PollError::Fatal { source, .. } | PollError::TimedOutWithError { source, .. } => {
                Some(source)
            }
            PollError::TimedOutWithValue { .. } => None,
        }
    }

    /// The last observed non-matching value, if the execution ended on one.
    pub fn last_value(&self) -> Option<&T> {
        match self {
            PollError::TimedOutWithValue { last, .. } => Some(last),
            _ => None,
        }
    }
}
