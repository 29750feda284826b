//! How a traversal that did not fail came to an end.

use std::{any::Any, fmt, sync::Arc};

/// Completion of a traversal that did not fail.
///
/// `StoppedEarly` is reported by [`exit`](crate::exit) and
/// [`exit_after`](crate::exit_after) style combinators, optionally carrying the sentinel
/// payload they were configured with. Lazy combinators downstream pass it through.
#[derive(Debug, Clone, Default)]
pub enum Outcome {
    /// The source ran dry.
    #[default]
    Completed,
    /// The traversal was ended on purpose before the source ran dry.
    StoppedEarly(Option<Payload>),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }

    pub fn is_stopped_early(&self) -> bool {
        matches!(self, Outcome::StoppedEarly(_))
    }

    /// The sentinel attached to an early stop, if any.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Outcome::StoppedEarly(payload) => payload.as_ref(),
            Outcome::Completed => None,
        }
    }
}

/// Type-erased sentinel value handed back when a traversal stops early.
///
/// Cloning is cheap; every traversal of the same pipeline sees the same payload.
///
/// ```rust
/// use lazyseq::Payload;
///
/// let payload = Payload::new("limit reached");
/// assert_eq!(payload.downcast_ref::<&str>(), Some(&"limit reached"));
/// assert_eq!(payload.downcast_ref::<u32>(), None);
/// ```
#[derive(Clone)]
pub struct Payload(Arc<dyn Any + Send + Sync>);

impl Payload {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Payload(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_of_completed_is_none() {
        assert!(Outcome::Completed.payload().is_none());
        assert!(Outcome::default().is_completed());
    }

    #[test]
    fn test_payload_downcast() {
        let outcome = Outcome::StoppedEarly(Some(Payload::new(7_u64)));
        assert!(outcome.is_stopped_early());

        let payload = outcome.payload().expect("payload");
        assert!(payload.is::<u64>());
        assert_eq!(payload.downcast_ref::<u64>(), Some(&7));
    }

    #[test]
    fn test_stopped_early_without_payload() {
        let outcome = Outcome::StoppedEarly(None);
        assert!(outcome.is_stopped_early());
        assert!(outcome.payload().is_none());
    }
}
