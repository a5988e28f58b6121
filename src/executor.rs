//! Retry executor - drives repeated query invocation until success, fatal
//! error, or timeout.
//!
//! The executor owns all timing, sleeping, and error bookkeeping. Attempt
//! counts and elapsed time live in loop-local state and are returned on the
//! outcome, so queries stay stateless and reusable.

use std::time::{Duration, Instant};

use crate::error::AttemptError;
use crate::outcome::{Outcome, PollError};
use crate::policy::{Classification, ErrorPolicy};
use crate::query::{PollOptions, PredicateAdapter, PredicateQuery, Query};

/// What a non-terminal attempt left behind: a non-matching value or a
/// tolerated error. Whichever the final attempt produced is carried on the
/// timeout terminal error.
enum Observed<T> {
    Value(T),
    Error(AttemptError),
}

fn deadline_error<T: std::fmt::Debug>(
    observed: Observed<T>,
    attempts: u32,
    elapsed: Duration,
) -> PollError<T> {
    match observed {
        Observed::Value(last) => PollError::TimedOutWithValue {
            last,
            attempts,
            elapsed,
        },
        Observed::Error(source) => PollError::TimedOutWithError {
            source,
            attempts,
            elapsed,
        },
    }
}

/// Executes queries with bounded retry.
///
/// Holds no mutable state between executions: one executor is a pure
/// function of (query, policy) -> outcome and can serve arbitrarily many
/// sequential executions.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    policy: ErrorPolicy,
}

impl Executor {
    /// Executor with the default classification policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor with a custom classification policy.
    pub fn with_policy(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    /// The classification policy in use.
    pub fn policy(&self) -> &ErrorPolicy {
        &self.policy
    }

    /// Execute a query with its own timeout and retry interval.
    pub async fn execute<Q: Query>(
        &self,
        query: &Q,
    ) -> Result<Outcome<Q::Output>, PollError<Q::Output>> {
        self.execute_with_options(query, query.options()).await
    }

    /// Execute a boolean check with its own timeout and retry interval.
    pub async fn execute_predicate<P: PredicateQuery>(
        &self,
        predicate: &P,
    ) -> Result<Outcome<bool>, PollError<bool>> {
        self.execute(&PredicateAdapter::new(predicate)).await
    }

    /// Execute a query with an explicit timeout/interval override.
    ///
    /// The first attempt always happens before any deadline check, so a
    /// zero timeout still gets exactly one try. The retry interval is
    /// measured from the end of the previous attempt and the full interval
    /// is always slept, so the final attempt may overshoot the deadline by
    /// up to one interval. An attempt in flight when the deadline passes
    /// runs to completion.
    pub async fn execute_with_options<Q: Query>(
        &self,
        query: &Q,
        options: PollOptions,
    ) -> Result<Outcome<Q::Output>, PollError<Q::Output>> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let observed = match query.attempt().await {
                Ok(value) => {
                    if query.is_match(&value) {
                        let elapsed = started.elapsed();
                        tracing::debug!(attempts, ?elapsed, "query satisfied");
                        return Ok(Outcome::new(value, attempts, elapsed));
                    }
                    tracing::trace!(attempts, observed = ?value, "result did not match, retrying");
                    Observed::Value(value)
                }
                Err(err) => match self.policy.classify(&err) {
                    Classification::Fatal => {
                        let elapsed = started.elapsed();
                        tracing::warn!(attempts, %err, "fatal error, aborting execution");
                        return Err(PollError::Fatal {
                            source: err,
                            attempts,
                            elapsed,
                        });
                    }
                    Classification::Retryable => {
                        tracing::trace!(attempts, %err, "tolerated error, retrying");
                        Observed::Error(err)
                    }
                },
            };

            let elapsed = started.elapsed();
            if elapsed >= options.timeout {
                tracing::warn!(attempts, ?elapsed, timeout = ?options.timeout, "deadline reached");
                return Err(deadline_error(observed, attempts, elapsed));
            }

            tokio::time::sleep(options.retry_interval).await;
        }
    }

    /// Repeatedly perform an action, then check a boolean condition, until
    /// the condition holds or the overall deadline passes.
    ///
    /// The action's produced value is discarded; only its errors matter and
    /// they classify exactly as in [`execute`](Executor::execute). The
    /// condition is itself evaluated robustly within its own (typically
    /// short) timeout window from `until.options()`. `attempts` on the
    /// returned diagnostics counts action rounds.
    pub async fn try_until<A, P>(
        &self,
        action: &A,
        until: &P,
        options: PollOptions,
    ) -> Result<Outcome<bool>, PollError<bool>>
    where
        A: Query,
        P: PredicateQuery,
    {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let observed = match action.attempt().await {
                Ok(_) => match self.execute_predicate(until).await {
                    Ok(outcome) => {
                        let elapsed = started.elapsed();
                        tracing::debug!(attempts, ?elapsed, "condition satisfied");
                        return Ok(Outcome::new(outcome.value, attempts, elapsed));
                    }
                    Err(PollError::Fatal { source, .. }) => {
                        let elapsed = started.elapsed();
                        tracing::warn!(attempts, %source, "fatal error in condition, aborting");
                        return Err(PollError::Fatal {
                            source,
                            attempts,
                            elapsed,
                        });
                    }
                    Err(PollError::TimedOutWithError { source, .. }) => Observed::Error(source),
                    Err(PollError::TimedOutWithValue { last, .. }) => Observed::Value(last),
                },
                Err(err) => match self.policy.classify(&err) {
                    Classification::Fatal => {
                        let elapsed = started.elapsed();
                        tracing::warn!(attempts, %err, "fatal error in action, aborting");
                        return Err(PollError::Fatal {
                            source: err,
                            attempts,
                            elapsed,
                        });
                    }
                    Classification::Retryable => {
                        tracing::trace!(attempts, %err, "tolerated error in action, retrying");
                        Observed::Error(err)
                    }
                },
            };

            let elapsed = started.elapsed();
            if elapsed >= options.timeout {
                tracing::warn!(attempts, ?elapsed, timeout = ?options.timeout, "deadline reached");
                return Err(deadline_error(observed, attempts, elapsed));
            }

            tokio::time::sleep(options.retry_interval).await;
        }
    }
}
