use crate::{
    cursor::{Cursor, Pull, Sequence, finished},
    step::Step,
};

/// A window of positions of the parent sequence.
///
/// Created by [`slice`].
#[derive(Clone)]
pub struct Slice<S> {
    source: S,
    begin: usize,
    end: Option<usize>,
}

/// Create a sequence of the values at positions `begin..end` (or `begin..` when `end` is
/// `None`).
///
/// The parent is never pulled past `end`, which makes slicing safe on unbounded sources.
/// A window with `end <= begin` is empty and never starts the parent at all.
///
/// ```rust
/// use lazyseq::{slice, to_vec};
///
/// # pollster::block_on(async {
/// assert_eq!(to_vec(&slice(vec![1, 2, 3, 4, 5], 1, Some(4))).await.unwrap(), vec![2, 3, 4]);
/// assert_eq!(to_vec(&slice(vec![1, 2, 3, 4, 5], 1, None)).await.unwrap(), vec![2, 3, 4, 5]);
/// # });
/// ```
pub fn slice<S: Sequence>(source: S, begin: usize, end: Option<usize>) -> Slice<S> {
    Slice { source, begin, end }
}

impl<S: Sequence> Slice<S> {
    fn is_empty_window(&self) -> bool {
        self.end.is_some_and(|end| end <= self.begin)
    }
}

impl<S: Sequence> Sequence for Slice<S> {
    type Item = S::Item;
    type Cursor = SliceCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        let inner = if self.is_empty_window() {
            None
        } else {
            Some(self.source.cursor())
        };
        SliceCursor {
            inner,
            index: 0,
            begin: self.begin,
            end: self.end,
        }
    }
}

pub struct SliceCursor<C> {
    inner: Option<C>,
    index: usize,
    begin: usize,
    end: Option<usize>,
}

impl<C: Cursor> Cursor for SliceCursor<C> {
    type Item = C::Item;

    async fn next(&mut self) -> Pull<Self::Item> {
        loop {
            let Some(inner) = self.inner.as_mut() else {
                return finished();
            };
            match inner.next().await {
                Step::Yielded(value) => {
                    let index = self.index;
                    self.index += 1;
                    if self.end.is_some_and(|end| self.index >= end) {
                        tracing::trace!(end = self.index, "slice reached its end, releasing parent");
                        self.inner = None;
                    }
                    if index >= self.begin {
                        return Step::Yielded(value);
                    }
                }
                Step::Complete(done) => {
                    self.inner = None;
                    return Step::Complete(done);
                }
            }
        }
    }
}
