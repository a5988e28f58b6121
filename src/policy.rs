//! Error classification policy.
//!
//! Decides, for an error raised during an attempt, whether the executor
//! should swallow it and retry, or propagate it immediately as fatal.

use serde::{Deserialize, Serialize};

use crate::error::{AttemptError, ErrorKind};

/// How a raised error steers the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Swallow and retry until the deadline
    Retryable,
    /// Abort the execution immediately
    Fatal,
}

/// Allow-list of error kinds tolerated as transient.
///
/// The default set covers transient external state; everything else is
/// fatal, so programmer errors surface immediately instead of hiding behind
/// a timeout-shaped failure. Classification is pure: the same kind always
/// classifies identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPolicy {
    retryable: Vec<ErrorKind>,
}

impl Default for ErrorPolicy {
    /// Default: tolerate `NotFound`, `Stale`, and `Unavailable`.
    fn default() -> Self {
        Self {
            retryable: vec![ErrorKind::NotFound, ErrorKind::Stale, ErrorKind::Unavailable],
        }
    }
}

impl ErrorPolicy {
    /// Policy tolerating exactly the given kinds.
    pub fn new(retryable: impl IntoIterator<Item = ErrorKind>) -> Self {
        Self {
            retryable: retryable.into_iter().collect(),
        }
    }

    /// Policy tolerating nothing: every error is fatal.
    pub fn strict() -> Self {
        Self {
            retryable: Vec::new(),
        }
    }

    /// Widen the tolerated set with another kind.
    pub fn with_tolerated(mut self, kind: ErrorKind) -> Self {
        if !self.retryable.contains(&kind) {
            self.retryable.push(kind);
        }
        self
    }

    /// Narrow the tolerated set by removing a kind.
    pub fn without_tolerated(mut self, kind: ErrorKind) -> Self {
        self.retryable.retain(|k| *k != kind);
        self
    }

    /// Whether errors of this kind are tolerated.
    pub fn is_retryable(&self, kind: ErrorKind) -> bool {
        self.retryable.contains(&kind)
    }

    /// Classify a raised attempt error.
    pub fn classify(&self, error: &AttemptError) -> Classification {
        if self.is_retryable(error.kind()) {
            Classification::Retryable
        } else {
            Classification::Fatal
        }
    }
}
