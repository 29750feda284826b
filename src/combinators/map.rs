use std::sync::Arc;

use super::Callback;
use crate::{
    cursor::{Cursor, Pull, Sequence, finished},
    resolve::Resolve,
    step::Step,
};

/// Transforms every value of the parent sequence.
///
/// Created by [`map`].
pub struct Map<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S: Clone, F> Clone for Map<S, F> {
    fn clone(&self) -> Self {
        Map {
            source: self.source.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

/// Create a sequence yielding `f(value, index, &source)` for every value of `source`.
///
/// The result of `f` is resolved before it is yielded, so `f` may return either
/// `Ok(value)` or a [`defer`](crate::defer)red future.
///
/// ```rust
/// use lazyseq::{Error, map, to_vec};
///
/// # pollster::block_on(async {
/// let labelled = map(vec!["a", "b"], |s, i, _| Ok::<_, Error>(format!("{i}:{s}")));
/// assert_eq!(to_vec(&labelled).await.unwrap(), vec!["0:a", "1:b"]);
/// # });
/// ```
pub fn map<S, F, R>(source: S, f: F) -> Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item, usize, &S) -> R,
    R: Resolve,
{
    Map {
        source,
        f: Arc::new(f),
    }
}

impl<S, F, R> Sequence for Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item, usize, &S) -> R,
    R: Resolve,
{
    type Item = R::Output;
    type Cursor = MapCursor<S, F>;

    fn cursor(&self) -> Self::Cursor {
        MapCursor {
            inner: Some(self.source.cursor()),
            callback: Callback::new(&self.source, &self.f),
        }
    }
}

pub struct MapCursor<S: Sequence, F> {
    inner: Option<S::Cursor>,
    callback: Callback<S, F>,
}

impl<S, F, R> Cursor for MapCursor<S, F>
where
    S: Sequence,
    F: Fn(S::Item, usize, &S) -> R,
    R: Resolve,
{
    type Item = R::Output;

    async fn next(&mut self) -> Pull<Self::Item> {
        let Some(inner) = self.inner.as_mut() else {
            return finished();
        };
        match inner.next().await {
            Step::Yielded(value) => match self.callback.call(value).resolve().await {
                Ok(mapped) => Step::Yielded(mapped),
                Err(e) => {
                    self.inner = None;
                    Step::Complete(Err(e))
                }
            },
            Step::Complete(done) => {
                self.inner = None;
                Step::Complete(done)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, resolve::defer, terminal::to_vec};
    use pollster::block_on;

    #[test]
    fn test_map_passes_source_position() {
        let seq = map(vec![10, 20, 30], |x, i, _| Ok::<_, Error>(x + i));
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![10, 21, 32]);
    }

    #[test]
    fn test_map_resolves_deferred_results() {
        let seq = map(vec![1, 2, 3], |x, _, _| defer(async move { Ok(x * 2) }));
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![2, 4, 6]);
    }

    #[test]
    fn test_map_source_argument_is_the_parent() {
        let seq = map(vec![1, 2], |x, _, src: &Vec<i32>| Ok::<_, Error>(x * src.len() as i32));
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![2, 4]);
    }

    #[test]
    fn test_map_failure_stops_the_cursor() {
        let seq = map(vec![1, 2, 3], |x, _, _| {
            if x == 2 {
                Err(Error::callback("two"))
            } else {
                Ok(x)
            }
        });
        let mut cursor = seq.cursor();

        block_on(async {
            assert_eq!(cursor.next().await.unwrap_yielded(), 1);
            assert!(cursor.next().await.unwrap_complete().is_err());
            // fused: the third value is never produced
            assert!(cursor.next().await.unwrap_complete().is_ok());
        });
    }
}
