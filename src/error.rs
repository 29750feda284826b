//! Failures that abort a traversal.

use thiserror::Error;

/// Boxed cause carried by [`Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shorthand used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why a traversal failed.
///
/// A failure completes the cursor that observed it. Values yielded before the failure
/// stay yielded; nothing is produced afterwards.
#[derive(Debug, Error)]
pub enum Error {
    /// A transform, predicate, fold or side-effect callback failed.
    #[error("callback failed: {0}")]
    Callback(#[source] BoxError),
    /// A source could not produce its next element.
    #[error("producer failed: {0}")]
    Producer(#[source] BoxError),
}

impl Error {
    /// Wrap a callback failure.
    ///
    /// ```rust
    /// use lazyseq::Error;
    ///
    /// let err = Error::callback("divide by zero");
    /// assert_eq!(err.to_string(), "callback failed: divide by zero");
    /// ```
    pub fn callback(cause: impl Into<BoxError>) -> Self {
        Error::Callback(cause.into())
    }

    /// Wrap a source failure.
    pub fn producer(cause: impl Into<BoxError>) -> Self {
        Error::Producer(cause.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_callback_keeps_cause_as_source() {
        let io = std::io::Error::other("disk gone");
        let err = Error::callback(io);

        assert!(matches!(err, Error::Callback(_)));
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk gone".into()));
    }

    #[test]
    fn test_producer_display() {
        let err = Error::producer(String::from("closed"));
        assert_eq!(err.to_string(), "producer failed: closed");
    }
}
