//! Closure-backed queries.

use async_trait::async_trait;
use std::fmt;
use std::future::Future;

use super::{PollOptions, Query};
use crate::error::AttemptError;

/// A [`Query`] backed by an async closure.
///
/// The closure is invoked once per attempt. With no expected value any
/// non-erroring return succeeds; [`expecting`](FnQuery::expecting) narrows
/// success to value equality.
pub struct FnQuery<F, T> {
    run: F,
    expected: Option<T>,
    options: PollOptions,
}

impl<F, T> FnQuery<F, T> {
    /// Wrap an async closure as a query with the given timing budget.
    pub fn new(options: PollOptions, run: F) -> Self {
        Self {
            run,
            expected: None,
            options,
        }
    }

    /// Treat only this value as success (value equality).
    pub fn expecting(mut self, value: T) -> Self {
        self.expected = Some(value);
        self
    }

    /// The expected value, if one was set.
    pub fn expected(&self) -> Option<&T> {
        self.expected.as_ref()
    }
}

#[async_trait]
impl<F, Fut, T> Query for FnQuery<F, T>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, AttemptError>> + Send,
    T: PartialEq + fmt::Debug + Send + Sync,
{
    type Output = T;

    async fn attempt(&self) -> Result<T, AttemptError> {
        (self.run)().await
    }

    fn is_match(&self, value: &T) -> bool {
        match &self.expected {
            Some(expected) => value == expected,
            None => true,
        }
    }

    fn options(&self) -> PollOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fn_query_attempt() {
        let query = FnQuery::new(PollOptions::default(), || async { Ok(7u32) });
        assert_eq!(query.attempt().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_fn_query_attempt_error() {
        let query: FnQuery<_, u32> = FnQuery::new(PollOptions::default(), || async {
            Err(AttemptError::not_found("nothing here"))
        });
        let err = query.attempt().await.unwrap_err();
        assert_eq!(err.message(), "nothing here");
    }

    #[test]
    fn test_fn_query_matches_anything_without_expected() {
        let query = FnQuery::new(PollOptions::default(), || async { Ok(7u32) });
        assert!(query.is_match(&7));
        assert!(query.is_match(&99));
        assert!(query.expected().is_none());
    }

    #[test]
    fn test_fn_query_expecting() {
        let query = FnQuery::new(PollOptions::default(), || async { Ok("B") }).expecting("A");
        assert!(query.is_match(&"A"));
        assert!(!query.is_match(&"B"));
        assert_eq!(query.expected(), Some(&"A"));
    }

    #[test]
    fn test_fn_query_options() {
        let options = PollOptions::new(Duration::from_millis(300), Duration::from_millis(30));
        let query = FnQuery::new(options, || async { Ok(()) });
        assert_eq!(Query::options(&query), options);
    }
}
