use std::sync::Arc;

use super::Callback;
use crate::{
    cursor::{Cursor, Pull, Sequence, finished},
    resolve::Resolve,
    step::Step,
};

/// Keeps the values of the parent sequence that satisfy a predicate.
///
/// Created by [`filter`].
pub struct Filter<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S: Clone, F> Clone for Filter<S, F> {
    fn clone(&self) -> Self {
        Filter {
            source: self.source.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

/// Create a sequence of the values for which `f(&value, index, &source)` is true.
///
/// `index` is the position in `source`, counting rejected values too.
///
/// ```rust
/// use lazyseq::{filter, to_vec};
///
/// # pollster::block_on(async {
/// let odd_positions = filter(vec!['a', 'b', 'c', 'd'], |_, i, _| i % 2 == 1);
/// assert_eq!(to_vec(&odd_positions).await.unwrap(), vec!['b', 'd']);
/// # });
/// ```
pub fn filter<S, F, R>(source: S, f: F) -> Filter<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    Filter {
        source,
        f: Arc::new(f),
    }
}

impl<S, F, R> Sequence for Filter<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    type Item = S::Item;
    type Cursor = FilterCursor<S, F>;

    fn cursor(&self) -> Self::Cursor {
        FilterCursor {
            inner: Some(self.source.cursor()),
            predicate: Callback::new(&self.source, &self.f),
        }
    }
}

pub struct FilterCursor<S: Sequence, F> {
    inner: Option<S::Cursor>,
    predicate: Callback<S, F>,
}

impl<S, F, R> Cursor for FilterCursor<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    type Item = S::Item;

    async fn next(&mut self) -> Pull<Self::Item> {
        loop {
            let Some(inner) = self.inner.as_mut() else {
                return finished();
            };
            match inner.next().await {
                Step::Yielded(value) => match self.predicate.call_ref(&value).resolve().await {
                    Ok(true) => return Step::Yielded(value),
                    Ok(false) => {}
                    Err(e) => {
                        self.inner = None;
                        return Step::Complete(Err(e));
                    }
                },
                Step::Complete(done) => {
                    self.inner = None;
                    return Step::Complete(done);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{combinators::map, error::Error, resolve::defer, terminal::to_vec};
    use pollster::block_on;

    #[test]
    fn test_filter_keeps_order() {
        let seq = filter(vec![5, 1, 4, 2, 3], |x, _, _| *x > 2);
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![5, 4, 3]);
    }

    #[test]
    fn test_filter_index_counts_rejected_values() {
        let seen = std::sync::Mutex::new(Vec::new());
        let seq = filter(vec![1, 2, 3, 4], |x, i, _| {
            seen.lock().unwrap().push(i);
            x % 2 == 0
        });

        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![2, 4]);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_filter_after_map_sees_same_index_contract() {
        let mapped = map(vec![1, 2, 3], |x, _, _| Ok::<_, Error>(x * 10));
        let seq = filter(mapped, |_, i, _| i != 1);
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![10, 30]);
    }

    #[test]
    fn test_filter_with_deferred_predicate() {
        let seq = filter(vec![1, 2, 3], |x, _, _| {
            let keep = *x != 2;
            defer(async move { Ok(keep) })
        });
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_filter_predicate_failure_stops_the_cursor() {
        let seq = filter(vec![1, 2, 3], |x, _, _| {
            if *x == 2 {
                Err(Error::callback("cannot judge two"))
            } else {
                Ok(true)
            }
        });
        let mut cursor = seq.cursor();

        block_on(async {
            assert_eq!(cursor.next().await.unwrap_yielded(), 1);
            assert!(matches!(cursor.next().await, Step::Complete(Err(Error::Callback(_)))));
            assert!(cursor.next().await.unwrap_complete().unwrap().is_completed());
        });
    }
}
