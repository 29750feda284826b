//! Lifting sources into sequences.
//!
//! `Vec<T>` and `[T; N]` are sequences as they are. Everything else goes through one of
//! the constructors here:
//!
//! - [`from_iter`] - any cloneable `IntoIterator`, walked afresh per traversal
//! - [`from_fn`] / [`try_from_fn`] - a closure building a new `Stream` per traversal
//! - [`from_pending`] - a closure building values that may still be pending
//! - [`from_stream`] - a one-shot `Stream`
//! - [`empty`] - nothing at all

use std::{iter::Fuse, marker::PhantomData, pin::Pin, sync::Arc};

use futures_util::{Stream, StreamExt, stream};
use parking_lot::Mutex;

use crate::{
    cursor::{Cursor, Pull, Sequence, finished},
    error::Error,
    resolve::Resolve,
    step::Step,
};

/// Cursor over a synchronous iterator.
pub struct IterCursor<I>(Fuse<I>);

impl<I: Iterator> IterCursor<I> {
    fn new(iter: I) -> Self {
        IterCursor(iter.fuse())
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    async fn next(&mut self) -> Pull<Self::Item> {
        match self.0.next() {
            Some(value) => Step::Yielded(value),
            None => finished(),
        }
    }
}

impl<T: Clone> Sequence for Vec<T> {
    type Item = T;
    type Cursor = IterCursor<std::vec::IntoIter<T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.clone().into_iter())
    }
}

impl<T: Clone, const N: usize> Sequence for [T; N] {
    type Item = T;
    type Cursor = IterCursor<std::array::IntoIter<T, N>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.clone().into_iter())
    }
}

/// Sequence over a cloneable collection or iterator. Created by [`from_iter`].
pub struct Iter<I>(Arc<I>);

impl<I> Clone for Iter<I> {
    fn clone(&self) -> Self {
        Iter(Arc::clone(&self.0))
    }
}

/// Lift any cloneable `IntoIterator` (a range, a slice iterator, a map's values, ...).
///
/// ```rust
/// use lazyseq::{from_iter, to_vec};
///
/// # pollster::block_on(async {
/// let evens = from_iter((0..10).step_by(2));
/// assert_eq!(to_vec(&evens).await.unwrap(), vec![0, 2, 4, 6, 8]);
/// # });
/// ```
pub fn from_iter<I>(items: I) -> Iter<I>
where
    I: IntoIterator + Clone,
{
    Iter(Arc::new(items))
}

impl<I> Sequence for Iter<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;
    type Cursor = IterCursor<I::IntoIter>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(I::clone(&self.0).into_iter())
    }
}

/// Cursor over an asynchronous stream of fallible items.
///
/// The stream is dropped as soon as it ends, fails, or the cursor is dropped.
pub struct StreamCursor<St> {
    stream: Option<Pin<Box<St>>>,
}

impl<St> StreamCursor<St> {
    fn new(stream: St) -> Self {
        StreamCursor {
            stream: Some(Box::pin(stream)),
        }
    }

    fn exhausted() -> Self {
        StreamCursor { stream: None }
    }
}

impl<St, T> Cursor for StreamCursor<St>
where
    St: Stream<Item = Result<T, Error>>,
{
    type Item = T;

    async fn next(&mut self) -> Pull<T> {
        let Some(stream) = self.stream.as_mut() else {
            return finished();
        };
        match stream.next().await {
            Some(Ok(value)) => Step::Yielded(value),
            Some(Err(e)) => {
                self.stream = None;
                Step::Complete(Err(e))
            }
            None => {
                self.stream = None;
                finished()
            }
        }
    }
}

type Infallible<St> = stream::Map<St, fn(<St as Stream>::Item) -> Result<<St as Stream>::Item, Error>>;

fn infallible<St: Stream>(stream: St) -> Infallible<St> {
    stream.map(Ok as fn(St::Item) -> Result<St::Item, Error>)
}

/// Restartable asynchronous source. Created by [`from_fn`].
pub struct FromFn<F>(Arc<F>);

impl<F> Clone for FromFn<F> {
    fn clone(&self) -> Self {
        FromFn(Arc::clone(&self.0))
    }
}

/// Lift a closure that builds a fresh `Stream` for every traversal.
///
/// ```rust
/// use futures_util::stream;
/// use lazyseq::{from_fn, to_vec};
///
/// # pollster::block_on(async {
/// let ticks = from_fn(|| stream::iter(["a", "b"]));
/// assert_eq!(to_vec(&ticks).await.unwrap(), vec!["a", "b"]);
/// assert_eq!(to_vec(&ticks).await.unwrap(), vec!["a", "b"]);
/// # });
/// ```
pub fn from_fn<F, St>(factory: F) -> FromFn<F>
where
    F: Fn() -> St,
    St: Stream,
{
    FromFn(Arc::new(factory))
}

impl<F, St> Sequence for FromFn<F>
where
    F: Fn() -> St,
    St: Stream,
{
    type Item = St::Item;
    type Cursor = StreamCursor<Infallible<St>>;

    fn cursor(&self) -> Self::Cursor {
        StreamCursor::new(infallible((self.0)()))
    }
}

/// Restartable asynchronous source of fallible items. Created by [`try_from_fn`].
pub struct TryFromFn<F>(Arc<F>);

impl<F> Clone for TryFromFn<F> {
    fn clone(&self) -> Self {
        TryFromFn(Arc::clone(&self.0))
    }
}

/// Lift a closure building a `Stream` of `Result`s. The first `Err` ends the traversal.
pub fn try_from_fn<F, St, T>(factory: F) -> TryFromFn<F>
where
    F: Fn() -> St,
    St: Stream<Item = Result<T, Error>>,
{
    TryFromFn(Arc::new(factory))
}

impl<F, St, T> Sequence for TryFromFn<F>
where
    F: Fn() -> St,
    St: Stream<Item = Result<T, Error>>,
{
    type Item = T;
    type Cursor = StreamCursor<St>;

    fn cursor(&self) -> Self::Cursor {
        StreamCursor::new((self.0)())
    }
}

/// Source whose elements may still be pending. Created by [`from_pending`].
pub struct FromPending<F>(Arc<F>);

impl<F> Clone for FromPending<F> {
    fn clone(&self) -> Self {
        FromPending(Arc::clone(&self.0))
    }
}

/// Lift a closure producing elements that resolve later.
///
/// Elements are awaited strictly in order; a slow element holds back the ones after it
/// rather than letting them overtake.
///
/// ```rust
/// use lazyseq::{defer, from_pending, to_vec};
///
/// # pollster::block_on(async {
/// let seq = from_pending(|| (1..=3).map(|n| defer(async move { Ok(n * 10) })));
/// assert_eq!(to_vec(&seq).await.unwrap(), vec![10, 20, 30]);
/// # });
/// ```
pub fn from_pending<F, I>(factory: F) -> FromPending<F>
where
    F: Fn() -> I,
    I: IntoIterator,
    I::Item: Resolve,
{
    FromPending(Arc::new(factory))
}

impl<F, I> Sequence for FromPending<F>
where
    F: Fn() -> I,
    I: IntoIterator,
    I::Item: Resolve,
{
    type Item = <I::Item as Resolve>::Output;
    type Cursor = PendingCursor<I::IntoIter>;

    fn cursor(&self) -> Self::Cursor {
        PendingCursor {
            iter: Some((self.0)().into_iter()),
        }
    }
}

pub struct PendingCursor<I> {
    iter: Option<I>,
}

impl<I> Cursor for PendingCursor<I>
where
    I: Iterator,
    I::Item: Resolve,
{
    type Item = <I::Item as Resolve>::Output;

    async fn next(&mut self) -> Pull<Self::Item> {
        let Some(pending) = self.iter.as_mut().and_then(Iterator::next) else {
            self.iter = None;
            return finished();
        };
        match pending.resolve().await {
            Ok(value) => Step::Yielded(value),
            Err(e) => {
                self.iter = None;
                Step::Complete(Err(e))
            }
        }
    }
}

/// One-shot stream source. Created by [`from_stream`].
pub struct FromStream<St>(Arc<Mutex<Option<St>>>);

impl<St> Clone for FromStream<St> {
    fn clone(&self) -> Self {
        FromStream(Arc::clone(&self.0))
    }
}

/// Lift a stream that can only be drained once.
///
/// The first traversal takes the stream. Later traversals are empty.
pub fn from_stream<St: Stream>(stream: St) -> FromStream<St> {
    FromStream(Arc::new(Mutex::new(Some(stream))))
}

impl<St: Stream> Sequence for FromStream<St> {
    type Item = St::Item;
    type Cursor = StreamCursor<Infallible<St>>;

    fn cursor(&self) -> Self::Cursor {
        match self.0.lock().take() {
            Some(stream) => StreamCursor::new(infallible(stream)),
            None => {
                tracing::warn!("single-use stream traversed again, yielding nothing");
                StreamCursor::exhausted()
            }
        }
    }
}

/// Sequence that yields nothing. Created by [`empty`].
pub struct Empty<T>(PhantomData<fn() -> T>);

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        Empty(PhantomData)
    }
}

pub fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

impl<T> Sequence for Empty<T> {
    type Item = T;
    type Cursor = IterCursor<std::iter::Empty<T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(std::iter::empty())
    }
}
