//! Native iteration over cursors.
//!
//! [`into_stream`] turns any cursor into a [`Stream`] for async consumers. With the
//! `blocking` feature, [`SeqIter`] drives a cursor from synchronous code, so a sequence
//! can sit in a `for` loop.
//!
//! Both surface a failure as one final `Err` item, after which they end.
//!
//! ```rust
//! use lazyseq::Seq;
//!
//! let seq = Seq::of(vec![1, 2, 3]).filter(|x, _, _| *x != 2);
//! let mut values = Vec::new();
//! for value in &seq {
//!     values.push(value.unwrap());
//! }
//! assert_eq!(values, vec![1, 3]);
//! ```

use futures_util::{Stream, stream};

use crate::{cursor::Cursor, error::Error, step::Step};

#[cfg(feature = "blocking")]
use crate::outcome::Outcome;

/// Adapt `cursor` into a [`Stream`] of `Result`s.
///
/// The cursor lives inside the stream; dropping the stream cancels the traversal.
pub fn into_stream<C: Cursor>(cursor: C) -> impl Stream<Item = Result<C::Item, Error>> {
    stream::unfold(Some(cursor), |state| async move {
        let mut cursor = state?;
        match cursor.next().await {
            Step::Yielded(value) => Some((Ok(value), Some(cursor))),
            Step::Complete(Ok(_)) => None,
            Step::Complete(Err(e)) => Some((Err(e), None)),
        }
    })
}

/// Blocking iterator over a cursor.
///
/// Each call to [`Iterator::next`] blocks the current thread until the cursor has pulled
/// its next value. Once the traversal ends, [`SeqIter::outcome`] tells how.
///
/// `&mut SeqIter` is an iterator too, so a loop can stop early and the iterator can still
/// be inspected afterwards.
#[cfg(feature = "blocking")]
pub struct SeqIter<C: Cursor> {
    state: SeqIterState<C>,
}

#[cfg(feature = "blocking")]
enum SeqIterState<C> {
    Active(C),
    Finished(Outcome),
    Failed,
    Invalid,
}

#[cfg(feature = "blocking")]
impl<C> SeqIterState<C> {
    fn take(&mut self) -> Self {
        std::mem::replace(self, SeqIterState::Invalid)
    }
}

#[cfg(feature = "blocking")]
impl<C: Cursor> SeqIter<C> {
    pub fn new(cursor: C) -> Self {
        SeqIter {
            state: SeqIterState::Active(cursor),
        }
    }

    /// Whether the traversal has ended, successfully or not.
    pub fn is_complete(&self) -> bool {
        matches!(
            self.state,
            SeqIterState::Finished(_) | SeqIterState::Failed
        )
    }

    /// How the traversal ended. `None` while it is still running or after a failure.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            SeqIterState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn into_outcome(self) -> Option<Outcome> {
        match self.state {
            SeqIterState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(feature = "blocking")]
impl<C: Cursor> Iterator for SeqIter<C> {
    type Item = Result<C::Item, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state.take() {
            SeqIterState::Active(mut cursor) => match pollster::block_on(cursor.next()) {
                Step::Yielded(value) => {
                    self.state = SeqIterState::Active(cursor);
                    Some(Ok(value))
                }
                Step::Complete(Ok(outcome)) => {
                    self.state = SeqIterState::Finished(outcome);
                    None
                }
                Step::Complete(Err(e)) => {
                    self.state = SeqIterState::Failed;
                    Some(Err(e))
                }
            },
            state @ (SeqIterState::Finished(_) | SeqIterState::Failed) => {
                self.state = state;
                None
            }
            SeqIterState::Invalid => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        combinators::{exit_with, map},
        cursor::Sequence,
        outcome::Payload,
    };
    use futures_util::StreamExt;
    use pollster::block_on;

    fn failing_at_three() -> impl Sequence<Item = i32> {
        map(vec![1, 2, 3, 4], |x, _, _| {
            if x == 3 {
                Err(Error::callback("three"))
            } else {
                Ok(x)
            }
        })
    }

    #[test]
    fn test_stream_yields_error_once_then_ends() {
        let items: Vec<_> = block_on(into_stream(failing_at_three().cursor()).collect());

        assert_eq!(items.len(), 3);
        assert_eq!(*items[0].as_ref().unwrap(), 1);
        assert_eq!(*items[1].as_ref().unwrap(), 2);
        assert!(items[2].is_err());
    }

    #[test]
    fn test_stream_of_empty_sequence_ends() {
        let items: Vec<_> = block_on(into_stream(Vec::<u8>::new().cursor()).collect());
        assert!(items.is_empty());
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn test_iter_reports_outcome_when_exhausted() {
        let seq = exit_with(vec![1, 2, 3], |x, _, _| *x == 2, Payload::new('!'));
        let mut iter = SeqIter::new(seq.cursor());

        assert_eq!(iter.outcome().map(Outcome::is_completed), None);
        let values: Vec<_> = (&mut iter).map(Result::unwrap).collect();
        assert_eq!(values, vec![1]);
        assert!(iter.is_complete());

        let outcome = iter.into_outcome().unwrap();
        assert_eq!(outcome.payload().and_then(|p| p.downcast_ref::<char>()), Some(&'!'));
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn test_iter_failure_ends_after_error() {
        let mut iter = SeqIter::new(failing_at_three().cursor());

        assert_eq!(iter.next().unwrap().unwrap(), 1);
        assert_eq!(iter.next().unwrap().unwrap(), 2);
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
        assert!(iter.is_complete());
        assert!(iter.outcome().is_none());
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn test_iter_stopped_by_consumer_is_not_complete() {
        let mut iter = SeqIter::new(vec![1, 2, 3].cursor());
        for value in &mut iter {
            if value.unwrap() == 2 {
                break;
            }
        }
        assert!(!iter.is_complete());
    }
}
