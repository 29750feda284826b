//! Combinators turning sequences into new sequences.
//!
//! Every function here is lazy: it only builds a new recipe. Work happens when a cursor
//! of the result is pulled. [`sort_by`] and [`reverse`] are the exceptions in spirit:
//! their cursors drain the whole parent on the first pull.

use std::sync::Arc;

mod buffered;
mod chain;
mod exit;
mod filter;
mod flat_map;
mod map;
mod slice;

pub use buffered::*;
pub use chain::*;
pub use exit::*;
pub use filter::*;
pub use flat_map::*;
pub use map::*;
pub use slice::*;

/// A shared callback together with the traversal-local state it is invoked with.
///
/// Every callback sees `(value, index, &source)`, where `index` counts the values pulled
/// from `source` by this cursor.
struct Callback<S, F> {
    source: S,
    f: Arc<F>,
    index: usize,
}

impl<S: Clone, F> Callback<S, F> {
    fn new(source: &S, f: &Arc<F>) -> Self {
        Callback {
            source: source.clone(),
            f: Arc::clone(f),
            index: 0,
        }
    }

    fn next_index(&mut self) -> usize {
        let index = self.index;
        self.index += 1;
        index
    }

    fn call<T, R>(&mut self, value: T) -> R
    where
        F: Fn(T, usize, &S) -> R,
    {
        let index = self.next_index();
        (self.f)(value, index, &self.source)
    }

    fn call_ref<T, R>(&mut self, value: &T) -> R
    where
        F: Fn(&T, usize, &S) -> R,
    {
        let index = self.next_index();
        (self.f)(value, index, &self.source)
    }
}
