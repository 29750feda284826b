use std::{cmp::Ordering, sync::Arc};

use crate::{
    cursor::{Cursor, Pull, Sequence, finished},
    outcome::Outcome,
    step::Step,
    terminal::drain_into,
};

/// Cursor state shared by the combinators that must see every value before yielding one.
enum Buffer<C: Cursor> {
    Pending(C),
    Ready(std::vec::IntoIter<C::Item>, Outcome),
    Done,
}

impl<C: Cursor> Buffer<C> {
    /// Drain the parent on first use, rearrange the values once, then hand them out.
    async fn next(&mut self, arrange: impl FnOnce(&mut Vec<C::Item>)) -> Pull<C::Item> {
        if let Buffer::Pending(cursor) = self {
            let mut items = Vec::new();
            match drain_into(cursor, &mut items).await {
                Ok(outcome) => {
                    tracing::debug!(len = items.len(), "buffered parent sequence");
                    arrange(&mut items);
                    *self = Buffer::Ready(items.into_iter(), outcome);
                }
                Err(e) => {
                    *self = Buffer::Done;
                    return Step::Complete(Err(e));
                }
            }
        }

        match self {
            Buffer::Ready(items, outcome) => match items.next() {
                Some(value) => Step::Yielded(value),
                None => {
                    let outcome = std::mem::take(outcome);
                    *self = Buffer::Done;
                    Step::Complete(Ok(outcome))
                }
            },
            Buffer::Pending(_) | Buffer::Done => finished(),
        }
    }
}

/// The parent's values in comparator order.
///
/// Created by [`sort_by`].
pub struct SortBy<S, F> {
    source: S,
    compare: Arc<F>,
}

impl<S: Clone, F> Clone for SortBy<S, F> {
    fn clone(&self) -> Self {
        SortBy {
            source: self.source.clone(),
            compare: Arc::clone(&self.compare),
        }
    }
}

/// Create a sequence of the parent's values, stably sorted by `compare`.
///
/// Building it is free. Its cursors drain the whole parent on the first pull, then yield
/// lazily from the sorted buffer, so the result can be traversed again like any other
/// sequence.
///
/// ```rust
/// use lazyseq::{sort_by, to_vec};
///
/// # pollster::block_on(async {
/// let seq = sort_by(vec![3, 1, 2], |a, b| a.cmp(b));
/// assert_eq!(to_vec(&seq).await.unwrap(), vec![1, 2, 3]);
/// # });
/// ```
pub fn sort_by<S, F>(source: S, compare: F) -> SortBy<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, &S::Item) -> Ordering,
{
    SortBy {
        source,
        compare: Arc::new(compare),
    }
}

impl<S, F> Sequence for SortBy<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, &S::Item) -> Ordering,
{
    type Item = S::Item;
    type Cursor = SortByCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        SortByCursor {
            buffer: Buffer::Pending(self.source.cursor()),
            compare: Arc::clone(&self.compare),
        }
    }
}

pub struct SortByCursor<C: Cursor, F> {
    buffer: Buffer<C>,
    compare: Arc<F>,
}

impl<C, F> Cursor for SortByCursor<C, F>
where
    C: Cursor,
    F: Fn(&C::Item, &C::Item) -> Ordering,
{
    type Item = C::Item;

    async fn next(&mut self) -> Pull<Self::Item> {
        let compare = &*self.compare;
        self.buffer
            .next(|items| items.sort_by(|a, b| compare(a, b)))
            .await
    }
}

/// The parent's values back to front.
///
/// Created by [`reverse`].
#[derive(Clone)]
pub struct Reverse<S> {
    source: S,
}

/// Create a sequence of the parent's values in reverse order.
///
/// Like [`sort_by`], each cursor buffers the whole parent on its first pull.
pub fn reverse<S: Sequence>(source: S) -> Reverse<S> {
    Reverse { source }
}

impl<S: Sequence> Sequence for Reverse<S> {
    type Item = S::Item;
    type Cursor = ReverseCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        ReverseCursor(Buffer::Pending(self.source.cursor()))
    }
}

pub struct ReverseCursor<C: Cursor>(Buffer<C>);

impl<C: Cursor> Cursor for ReverseCursor<C> {
    type Item = C::Item;

    async fn next(&mut self) -> Pull<Self::Item> {
        self.0.next(|items| items.reverse()).await
    }
}
