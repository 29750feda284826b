use std::sync::Arc;

use super::Callback;
use crate::{
    cursor::{Cursor, Pull, Sequence, finished},
    resolve::Resolve,
    step::Step,
};

/// Expands every value of the parent sequence into a child sequence.
///
/// Created by [`flat_map`].
pub struct FlatMap<S, F> {
    source: S,
    f: Arc<F>,
}

impl<S: Clone, F> Clone for FlatMap<S, F> {
    fn clone(&self) -> Self {
        FlatMap {
            source: self.source.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

/// Create a sequence yielding every value of `f(value, index, &source)` in turn.
///
/// `f` may resolve to any [`Sequence`]: a `Vec`, an array, a [`Seq`](crate::Seq), or an
/// `Either` when the shape depends on the value. Each child is drained before the parent
/// is pulled again.
///
/// ```rust
/// use lazyseq::{Error, flat_map, to_vec};
///
/// # pollster::block_on(async {
/// let seq = flat_map(vec![1, 2], |x, _, _| Ok::<_, Error>(vec![x + 10, x + 20]));
/// assert_eq!(to_vec(&seq).await.unwrap(), vec![11, 21, 12, 22]);
/// # });
/// ```
pub fn flat_map<S, F, R>(source: S, f: F) -> FlatMap<S, F>
where
    S: Sequence,
    F: Fn(S::Item, usize, &S) -> R,
    R: Resolve,
    R::Output: Sequence,
{
    FlatMap {
        source,
        f: Arc::new(f),
    }
}

impl<S, F, R> Sequence for FlatMap<S, F>
where
    S: Sequence,
    F: Fn(S::Item, usize, &S) -> R,
    R: Resolve,
    R::Output: Sequence,
{
    type Item = <R::Output as Sequence>::Item;
    type Cursor = FlatMapCursor<S, F, R::Output>;

    fn cursor(&self) -> Self::Cursor {
        FlatMapCursor {
            outer: Some(self.source.cursor()),
            child: None,
            callback: Callback::new(&self.source, &self.f),
        }
    }
}

pub struct FlatMapCursor<S: Sequence, F, C: Sequence> {
    outer: Option<S::Cursor>,
    child: Option<C::Cursor>,
    callback: Callback<S, F>,
}

impl<S, F, R, C> Cursor for FlatMapCursor<S, F, C>
where
    S: Sequence,
    F: Fn(S::Item, usize, &S) -> R,
    R: Resolve<Output = C>,
    C: Sequence,
{
    type Item = C::Item;

    async fn next(&mut self) -> Pull<Self::Item> {
        loop {
            if let Some(child) = self.child.as_mut() {
                match child.next().await {
                    Step::Yielded(value) => return Step::Yielded(value),
                    Step::Complete(Ok(_)) => self.child = None,
                    Step::Complete(Err(e)) => {
                        self.child = None;
                        self.outer = None;
                        return Step::Complete(Err(e));
                    }
                }
                continue;
            }

            let Some(outer) = self.outer.as_mut() else {
                return finished();
            };
            match outer.next().await {
                Step::Yielded(value) => match self.callback.call(value).resolve().await {
                    Ok(child) => self.child = Some(child.cursor()),
                    Err(e) => {
                        self.outer = None;
                        return Step::Complete(Err(e));
                    }
                },
                Step::Complete(done) => {
                    self.outer = None;
                    return Step::Complete(done);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, resolve::defer, source::empty, terminal::to_vec};
    use either::Either;
    use pollster::block_on;

    #[test]
    fn test_flat_map_deferred_child() {
        let seq = flat_map(vec![1, 2, 3], |x, _, _| defer(async move { Ok([x, x]) }));
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_flat_map_skips_empty_children() {
        let seq = flat_map(vec![0, 2, 0, 1], |n, _, _| {
            Ok::<_, Error>((0..n).collect::<Vec<_>>())
        });
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![0, 1, 0]);
    }

    #[test]
    fn test_flat_map_either_child_shapes() {
        let seq = flat_map(vec![1, 2, 3], |n, _, _| {
            Ok::<_, Error>(if n % 2 == 0 {
                Either::Left(vec![n; 2])
            } else {
                Either::Right(empty::<i32>())
            })
        });
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![2, 2]);
    }

    #[test]
    fn test_flat_map_child_failure_aborts() {
        let seq = flat_map(vec![1, 2], |n, _, _| {
            Ok::<_, Error>(crate::combinators::map(vec![n], |v, _, _| {
                if v == 2 {
                    Err(Error::callback("child failed"))
                } else {
                    Ok(v)
                }
            }))
        });
        let mut cursor = seq.cursor();

        block_on(async {
            assert_eq!(cursor.next().await.unwrap_yielded(), 1);
            assert!(cursor.next().await.unwrap_complete().is_err());
        });
    }
}
