use std::sync::Arc;

use super::Callback;
use crate::{
    cursor::{Cursor, Pull, Sequence},
    outcome::{Outcome, Payload},
    resolve::Resolve,
    step::Step,
};

/// Ends a traversal the first time a predicate holds.
///
/// Created by [`exit`], [`exit_with`], [`exit_after`] and [`exit_after_with`].
pub struct Exit<S, F> {
    source: S,
    f: Arc<F>,
    payload: Option<Payload>,
    inclusive: bool,
}

impl<S: Clone, F> Clone for Exit<S, F> {
    fn clone(&self) -> Self {
        Exit {
            source: self.source.clone(),
            f: Arc::clone(&self.f),
            payload: self.payload.clone(),
            inclusive: self.inclusive,
        }
    }
}

/// Yield values until `f(&value, index, &source)` holds; the triggering value is dropped.
///
/// The traversal completes with [`Outcome::StoppedEarly`] and the parent is released
/// immediately.
///
/// ```rust
/// use lazyseq::{exit, to_vec};
///
/// # pollster::block_on(async {
/// let seq = exit(vec![1, 2, 3, 4, 5], |x, _, _| *x > 3);
/// assert_eq!(to_vec(&seq).await.unwrap(), vec![1, 2, 3]);
/// # });
/// ```
pub fn exit<S, F, R>(source: S, f: F) -> Exit<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    new_exit(source, f, None, false)
}

/// Like [`exit`], reporting `payload` in the traversal's outcome.
pub fn exit_with<S, F, R>(source: S, f: F, payload: Payload) -> Exit<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    new_exit(source, f, Some(payload), false)
}

/// Yield values until `f(&value, index, &source)` holds, including the triggering value.
///
/// ```rust
/// use lazyseq::{exit_after, to_vec};
///
/// # pollster::block_on(async {
/// let seq = exit_after(vec![1, 2, 3, 4, 5], |x, _, _| *x > 3);
/// assert_eq!(to_vec(&seq).await.unwrap(), vec![1, 2, 3, 4]);
/// # });
/// ```
pub fn exit_after<S, F, R>(source: S, f: F) -> Exit<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    new_exit(source, f, None, true)
}

/// Like [`exit_after`], reporting `payload` in the traversal's outcome.
pub fn exit_after_with<S, F, R>(source: S, f: F, payload: Payload) -> Exit<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    new_exit(source, f, Some(payload), true)
}

fn new_exit<S, F>(source: S, f: F, payload: Option<Payload>, inclusive: bool) -> Exit<S, F> {
    Exit {
        source,
        f: Arc::new(f),
        payload,
        inclusive,
    }
}

impl<S, F, R> Sequence for Exit<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    type Item = S::Item;
    type Cursor = ExitCursor<S, F>;

    fn cursor(&self) -> Self::Cursor {
        ExitCursor {
            inner: Some(self.source.cursor()),
            predicate: Callback::new(&self.source, &self.f),
            payload: self.payload.clone(),
            inclusive: self.inclusive,
            stopped: None,
        }
    }
}

pub struct ExitCursor<S: Sequence, F> {
    inner: Option<S::Cursor>,
    predicate: Callback<S, F>,
    payload: Option<Payload>,
    inclusive: bool,
    // set when the triggering value was handed out and the stop is still to be reported
    stopped: Option<Outcome>,
}

impl<S, F, R> Cursor for ExitCursor<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    type Item = S::Item;

    async fn next(&mut self) -> Pull<Self::Item> {
        let Some(inner) = self.inner.as_mut() else {
            return Step::Complete(Ok(self.stopped.take().unwrap_or_default()));
        };
        let value = match inner.next().await {
            Step::Yielded(value) => value,
            Step::Complete(done) => {
                self.inner = None;
                return Step::Complete(done);
            }
        };
        match self.predicate.call_ref(&value).resolve().await {
            Ok(false) => Step::Yielded(value),
            Ok(true) => {
                tracing::trace!(
                    index = self.predicate.index - 1,
                    inclusive = self.inclusive,
                    "exit condition met, releasing parent"
                );
                self.inner = None;
                let outcome = Outcome::StoppedEarly(self.payload.clone());
                if self.inclusive {
                    self.stopped = Some(outcome);
                    Step::Yielded(value)
                } else {
                    Step::Complete(Ok(outcome))
                }
            }
            Err(e) => {
                self.inner = None;
                Step::Complete(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{combinators::map, error::Error, terminal::to_vec};
    use pollster::block_on;

    #[test]
    fn test_exit_does_not_interrupt_valid_results() {
        let doubled = map(vec![1, 2, 3, 4, 5], |x, _, _| Ok::<_, Error>(x * 2));
        let stopped = exit(doubled, |x, _, _| *x > 4);
        let seq = map(stopped, |x, _, _| Ok::<_, Error>(x * 10));
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![20, 40]);
    }

    #[test]
    fn test_exit_reports_payload() {
        let seq = exit_with(vec![1, 2, 3], |x, _, _| *x == 2, Payload::new("hit two"));
        let mut cursor = seq.cursor();

        block_on(async {
            assert_eq!(cursor.next().await.unwrap_yielded(), 1);
            let outcome = cursor.next().await.unwrap_complete().unwrap();
            assert_eq!(
                outcome.payload().and_then(|p| p.downcast_ref::<&str>()),
                Some(&"hit two")
            );
            assert!(cursor.next().await.unwrap_complete().unwrap().is_completed());
        });
    }

    #[test]
    fn test_exit_after_reports_stop_after_trigger() {
        let seq = exit_after_with(vec![1, 2, 3], |x, _, _| *x == 2, Payload::new(2_u8));
        let mut cursor = seq.cursor();

        block_on(async {
            assert_eq!(cursor.next().await.unwrap_yielded(), 1);
            assert_eq!(cursor.next().await.unwrap_yielded(), 2);
            let outcome = cursor.next().await.unwrap_complete().unwrap();
            assert!(outcome.is_stopped_early());
            assert_eq!(outcome.payload().and_then(|p| p.downcast_ref::<u8>()), Some(&2));
        });
    }

    #[test]
    fn test_exit_never_triggered_completes_normally() {
        let seq = exit(vec![1, 2], |_, _, _| false);
        let mut cursor = seq.cursor();

        block_on(async {
            assert_eq!(cursor.next().await.unwrap_yielded(), 1);
            assert_eq!(cursor.next().await.unwrap_yielded(), 2);
            assert!(cursor.next().await.unwrap_complete().unwrap().is_completed());
        });
    }

    #[test]
    fn test_exit_predicate_failure_stops_the_cursor() {
        let seq = exit_after(vec![1, 2, 3], |x, _, _| {
            if *x == 2 {
                Err(Error::callback("cannot judge two"))
            } else {
                Ok(false)
            }
        });
        let mut cursor = seq.cursor();

        block_on(async {
            assert_eq!(cursor.next().await.unwrap_yielded(), 1);
            assert!(matches!(cursor.next().await, Step::Complete(Err(Error::Callback(_)))));
            assert!(cursor.next().await.unwrap_complete().unwrap().is_completed());
        });
        assert!(block_on(to_vec(&seq)).is_err());
    }
}
