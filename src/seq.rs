//! The fluent front end.
//!
//! [`Seq`] wraps one [`Sequence`] and offers every combinator and terminal operation as a
//! method. Combinator methods borrow the receiver and return a new `Seq`, so a pipeline
//! can be branched freely:
//!
//! ```rust
//! use lazyseq::{Error, Seq};
//!
//! # pollster::block_on(async {
//! let numbers = Seq::of(vec![1, 2, 3, 4, 5]);
//! let evens = numbers.filter(|x, _, _| x % 2 == 0);
//! let doubled = numbers.map(|x, _, _| Ok::<_, Error>(x * 2));
//!
//! assert_eq!(evens.to_vec().await.unwrap(), vec![2, 4]);
//! assert_eq!(doubled.to_vec().await.unwrap(), vec![2, 4, 6, 8, 10]);
//! assert_eq!(numbers.to_vec().await.unwrap(), vec![1, 2, 3, 4, 5]);
//! # });
//! ```
//!
//! Callbacks receive the `Seq` they were attached to as their third argument.

use std::cmp::Ordering;

use futures_util::Stream;

#[cfg(feature = "blocking")]
use crate::iter::SeqIter;
use crate::{
    combinators::{self, Concat, Exit, Filter, FlatMap, Map, Reverse, Slice, SortBy},
    cursor::Sequence,
    error::Result,
    iter::into_stream,
    outcome::{Outcome, Payload},
    resolve::Resolve,
    source::{self, Empty, FromFn, FromPending, FromStream, Iter, TryFromFn},
    terminal,
};

/// An immutable, restartable pipeline.
#[derive(Clone, Debug)]
pub struct Seq<S>(S);

impl<S: Sequence> Seq<S> {
    /// Lift any sequence: a `Vec`, an array, a source, a combinator, another `Seq`.
    pub fn of(source: S) -> Self {
        Seq(source)
    }

    pub fn into_inner(self) -> S {
        self.0
    }

    /// Start a traversal by hand.
    pub fn cursor(&self) -> S::Cursor {
        self.0.cursor()
    }

    pub fn concat<B>(&self, other: B) -> Seq<Concat<Self, B>>
    where
        B: Sequence<Item = S::Item>,
    {
        Seq(combinators::concat(self.clone(), other))
    }

    pub fn map<F, R>(&self, f: F) -> Seq<Map<Self, F>>
    where
        F: Fn(S::Item, usize, &Self) -> R,
        R: Resolve,
    {
        Seq(combinators::map(self.clone(), f))
    }

    pub fn filter<F, R>(&self, f: F) -> Seq<Filter<Self, F>>
    where
        F: Fn(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        Seq(combinators::filter(self.clone(), f))
    }

    pub fn flat_map<F, R>(&self, f: F) -> Seq<FlatMap<Self, F>>
    where
        F: Fn(S::Item, usize, &Self) -> R,
        R: Resolve,
        R::Output: Sequence,
    {
        Seq(combinators::flat_map(self.clone(), f))
    }

    pub fn exit<F, R>(&self, f: F) -> Seq<Exit<Self, F>>
    where
        F: Fn(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        Seq(combinators::exit(self.clone(), f))
    }

    pub fn exit_with<F, R>(&self, f: F, payload: Payload) -> Seq<Exit<Self, F>>
    where
        F: Fn(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        Seq(combinators::exit_with(self.clone(), f, payload))
    }

    pub fn exit_after<F, R>(&self, f: F) -> Seq<Exit<Self, F>>
    where
        F: Fn(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        Seq(combinators::exit_after(self.clone(), f))
    }

    pub fn exit_after_with<F, R>(&self, f: F, payload: Payload) -> Seq<Exit<Self, F>>
    where
        F: Fn(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        Seq(combinators::exit_after_with(self.clone(), f, payload))
    }

    pub fn slice(&self, begin: usize, end: Option<usize>) -> Seq<Slice<Self>> {
        Seq(combinators::slice(self.clone(), begin, end))
    }

    pub fn sort_by<F>(&self, compare: F) -> Seq<SortBy<Self, F>>
    where
        F: Fn(&S::Item, &S::Item) -> Ordering,
    {
        Seq(combinators::sort_by(self.clone(), compare))
    }

    pub fn reverse(&self) -> Seq<Reverse<Self>> {
        Seq(combinators::reverse(self.clone()))
    }

    pub async fn reduce<F, R, I, A>(&self, f: F, init: I) -> Result<A>
    where
        F: FnMut(A, &S::Item, usize, &Self) -> R,
        R: Resolve<Output = A>,
        I: Resolve<Output = A>,
    {
        terminal::reduce(self, f, init).await
    }

    pub async fn reduce_until<F, R, I, A, P, Q>(&self, f: F, init: I, stop: P) -> Result<A>
    where
        F: FnMut(A, &S::Item, usize, &Self) -> R,
        R: Resolve<Output = A>,
        I: Resolve<Output = A>,
        P: FnMut(&A, &S::Item, usize, &Self) -> Q,
        Q: Resolve<Output = bool>,
    {
        terminal::reduce_until(self, f, init, stop).await
    }

    pub async fn find<F, R>(&self, f: F) -> Result<Option<S::Item>>
    where
        F: FnMut(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        terminal::find(self, f).await
    }

    pub async fn first(&self) -> Result<Option<S::Item>> {
        terminal::first(self).await
    }

    pub async fn first_where<F, R>(&self, f: F) -> Result<Option<S::Item>>
    where
        F: FnMut(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        terminal::first_where(self, f).await
    }

    pub async fn last(&self) -> Result<Option<S::Item>> {
        terminal::last(self).await
    }

    pub async fn last_where<F, R>(&self, f: F) -> Result<Option<S::Item>>
    where
        F: FnMut(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        terminal::last_where(self, f).await
    }

    pub async fn some<F, R>(&self, f: F) -> Result<bool>
    where
        F: FnMut(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        terminal::some(self, f).await
    }

    pub async fn every<F, R>(&self, f: F) -> Result<bool>
    where
        F: FnMut(&S::Item, usize, &Self) -> R,
        R: Resolve<Output = bool>,
    {
        terminal::every(self, f).await
    }

    pub async fn includes(&self, needle: &S::Item) -> Result<bool>
    where
        S::Item: PartialEq,
    {
        terminal::includes(self, needle).await
    }

    pub async fn to_vec(&self) -> Result<Vec<S::Item>> {
        terminal::to_vec(self).await
    }

    pub async fn for_each<F, R>(&self, f: F) -> Result<Outcome>
    where
        F: FnMut(S::Item, usize) -> R,
        R: Resolve<Output = ()>,
    {
        terminal::for_each(self, f).await
    }

    /// A fresh traversal as a [`Stream`]. A failure arrives as the last item.
    pub fn stream(&self) -> impl Stream<Item = Result<S::Item>> + use<S> {
        into_stream(self.0.cursor())
    }

    /// A fresh traversal as a blocking [`Iterator`].
    #[cfg(feature = "blocking")]
    pub fn iter(&self) -> SeqIter<S::Cursor> {
        SeqIter::new(self.0.cursor())
    }
}

impl<I> Seq<Iter<I>>
where
    I: IntoIterator + Clone,
{
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter(items: I) -> Self {
        Seq(source::from_iter(items))
    }
}

impl<F> Seq<FromFn<F>> {
    pub fn from_fn<St>(factory: F) -> Self
    where
        F: Fn() -> St,
        St: Stream,
    {
        Seq(source::from_fn(factory))
    }
}

impl<F> Seq<TryFromFn<F>> {
    pub fn try_from_fn<St, T>(factory: F) -> Self
    where
        F: Fn() -> St,
        St: Stream<Item = Result<T>>,
    {
        Seq(source::try_from_fn(factory))
    }
}

impl<F> Seq<FromPending<F>> {
    pub fn from_pending<I>(factory: F) -> Self
    where
        F: Fn() -> I,
        I: IntoIterator,
        I::Item: Resolve,
    {
        Seq(source::from_pending(factory))
    }
}

impl<St: Stream> Seq<FromStream<St>> {
    /// Wrap a stream that can only be drained once. See [`from_stream`](crate::from_stream).
    pub fn from_stream(stream: St) -> Self {
        Seq(source::from_stream(stream))
    }
}

impl<T> Seq<Empty<T>> {
    pub fn empty() -> Self {
        Seq(source::empty())
    }
}

impl<S: Sequence> Sequence for Seq<S> {
    type Item = S::Item;
    type Cursor = S::Cursor;

    fn cursor(&self) -> Self::Cursor {
        self.0.cursor()
    }
}

#[cfg(feature = "blocking")]
impl<S: Sequence> IntoIterator for &Seq<S> {
    type Item = Result<S::Item>;
    type IntoIter = SeqIter<S::Cursor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
