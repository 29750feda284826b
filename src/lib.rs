//! # lazyseq: lazy, restartable sequence pipelines
//!
//! Describe a pipeline of transformations over values that arrive synchronously or
//! asynchronously, and pull values through it only when a terminal operation or a loop
//! asks for them.
//!
//! ## Core Traits
//!
//! - **[`Sequence`]**: a restartable recipe; every [`Sequence::cursor`] call starts a new
//!   traversal
//! - **[`Cursor`]**: one in-flight traversal, pulled with `next().await`
//! - **[`Resolve`]**: a callback result that is ready now or later (see [`defer`])
//!
//! ## Key Features
//!
//! - **Lazy**: building a pipeline does no work; values flow one at a time
//! - **Short-circuiting**: [`exit`], [`slice`], [`find`] and friends stop pulling the
//!   source as soon as the answer is known, and release it immediately
//! - **Order-preserving**: pending values are awaited one after another, never raced
//!
//! ## Example
//!
//! ```
//! use lazyseq::{Error, Seq};
//!
//! # pollster::block_on(async {
//! let seq = Seq::of(vec![1, 2, 3, 4, 5])
//!     .map(|x, _, _| Ok::<_, Error>(x * 2))
//!     .exit(|x, _, _| *x > 6);
//!
//! assert_eq!(seq.to_vec().await.unwrap(), vec![2, 4, 6]);
//! // and again, from the start
//! assert_eq!(seq.first().await.unwrap(), Some(2));
//! # });
//! ```
//!
//! ## Common Functions
//!
//! **Sources:**
//! - [`from_iter(items)`] - any cloneable `IntoIterator`
//! - [`from_fn(factory)`] - a fresh `Stream` per traversal
//! - [`from_pending(factory)`] - elements that resolve later
//! - [`from_stream(stream)`] - a one-shot `Stream`
//!
//! **Combinators:**
//! - [`map`], [`filter`], [`flat_map`], [`concat`], [`slice`]
//! - [`exit`], [`exit_after`] - stop when a predicate holds
//! - [`sort_by`], [`reverse`] - buffer the parent, then yield
//!
//! **Terminal operations:**
//! - [`to_vec`], [`reduce`], [`reduce_until`], [`for_each`]
//! - [`find`], [`first`], [`last`], [`some`], [`every`], [`includes`]
//!
//! [`from_iter(items)`]: from_iter
//! [`from_fn(factory)`]: from_fn
//! [`from_pending(factory)`]: from_pending
//! [`from_stream(stream)`]: from_stream

pub mod combinators;
mod cursor;
mod error;
pub mod iter;
mod outcome;
pub mod prelude;
mod resolve;
mod seq;
pub mod source;
mod step;
pub mod terminal;

pub use combinators::*;
pub use cursor::*;
pub use error::*;
#[cfg(feature = "blocking")]
pub use iter::SeqIter;
pub use iter::into_stream;
pub use outcome::*;
pub use resolve::*;
pub use seq::*;
pub use source::*;
pub use step::*;
pub use terminal::*;
