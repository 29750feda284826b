//! The two traits everything else is built on.
//!
//! A [`Sequence`] is a recipe, not a container: each call to [`Sequence::cursor`] starts a
//! fresh traversal. A [`Cursor`] is that traversal. It is pulled with [`Cursor::next`]
//! until it returns [`Step::Complete`], and dropping it cancels the traversal and
//! releases whatever the source holds.
//!
//! ```rust
//! use lazyseq::{Cursor, Outcome, Sequence, Step};
//!
//! # pollster::block_on(async {
//! let numbers = vec![1, 2];
//! let mut first = numbers.cursor();
//! let mut second = numbers.cursor();
//!
//! assert_eq!(first.next().await.unwrap_yielded(), 1);
//! assert_eq!(first.next().await.unwrap_yielded(), 2);
//! assert!(matches!(first.next().await, Step::Complete(Ok(Outcome::Completed))));
//!
//! // independent position
//! assert_eq!(second.next().await.unwrap_yielded(), 1);
//! # });
//! ```

use std::future::Future;

use either::Either;

use crate::{error::Error, outcome::Outcome, step::Step};

/// What a single pull produces: the next value, or how the traversal ended.
pub type Pull<T> = Step<T, Result<Outcome, Error>>;

/// A single in-flight traversal.
///
/// Cursors are fused: after the first `Complete`, every later pull returns
/// `Complete(Ok(Outcome::Completed))` without touching upstream again.
pub trait Cursor {
    type Item;

    /// Pull the next value, suspending while it is not available yet.
    fn next(&mut self) -> impl Future<Output = Pull<Self::Item>>;
}

/// A restartable recipe for producing an ordered stream of values.
///
/// Cloning a sequence is cheap: sources and combinators keep their data and callbacks
/// behind reference counts.
pub trait Sequence: Clone {
    type Item;
    type Cursor: Cursor<Item = Self::Item>;

    /// Start a new, independent traversal.
    fn cursor(&self) -> Self::Cursor;
}

pub(crate) fn finished<T>() -> Pull<T> {
    Step::Complete(Ok(Outcome::Completed))
}

impl<C> Cursor for Box<C>
where
    C: Cursor,
{
    type Item = C::Item;

    fn next(&mut self) -> impl Future<Output = Pull<Self::Item>> {
        (**self).next()
    }
}

impl<L, R> Cursor for Either<L, R>
where
    L: Cursor,
    R: Cursor<Item = L::Item>,
{
    type Item = L::Item;

    async fn next(&mut self) -> Pull<Self::Item> {
        match self {
            Either::Left(l) => l.next().await,
            Either::Right(r) => r.next().await,
        }
    }
}

/// Either of two pipeline shapes with the same item type, picked at runtime.
impl<L, R> Sequence for Either<L, R>
where
    L: Sequence,
    R: Sequence<Item = L::Item>,
{
    type Item = L::Item;
    type Cursor = Either<L::Cursor, R::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        match self {
            Either::Left(l) => Either::Left(l.cursor()),
            Either::Right(r) => Either::Right(r.cursor()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    async fn drain<C: Cursor>(mut cursor: C) -> Vec<C::Item> {
        let mut out = Vec::new();
        while let Step::Yielded(v) = cursor.next().await {
            out.push(v);
        }
        out
    }

    #[test]
    fn test_either_left_branch_selected() {
        let seq: Either<Vec<i32>, [i32; 2]> = Either::Left(vec![1, 2, 3]);
        assert_eq!(block_on(drain(seq.cursor())), vec![1, 2, 3]);
    }

    #[test]
    fn test_either_right_branch_selected() {
        let seq: Either<Vec<i32>, [i32; 2]> = Either::Right([7, 8]);
        assert_eq!(block_on(drain(seq.cursor())), vec![7, 8]);
    }

    #[test]
    fn test_boxed_cursor_delegates() {
        let boxed = Box::new(vec!['a', 'b'].cursor());
        assert_eq!(block_on(drain(boxed)), vec!['a', 'b']);
    }

    #[test]
    fn test_exhausted_cursor_stays_complete() {
        let mut cursor = Vec::<u8>::new().cursor();
        block_on(async {
            assert!(cursor.next().await.is_complete());
            assert!(matches!(
                cursor.next().await,
                Step::Complete(Ok(Outcome::Completed))
            ));
        });
    }
}
