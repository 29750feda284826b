//! Values that may or may not be ready yet.
//!
//! Every callback slot in this crate accepts any [`Resolve`], so a callback can answer
//! immediately (`Ok(value)`, or a plain `bool` for predicates) or hand back a future
//! wrapped with [`defer`]. Both are awaited the same way, one at a time, in order.

use std::future::{Future, Ready, ready};

use crate::error::Error;

/// A callback result, ready now or once a future completes.
///
/// ```rust
/// use lazyseq::{Error, Resolve, defer};
///
/// # pollster::block_on(async {
/// assert_eq!(Ok::<_, Error>(3).resolve().await.unwrap(), 3);
/// assert_eq!(defer(async { Ok(4) }).resolve().await.unwrap(), 4);
/// assert!(true.resolve().await.unwrap());
/// # });
/// ```
pub trait Resolve {
    /// Value produced once resolved
    type Output;
    type Future: Future<Output = Result<Self::Output, Error>>;

    fn resolve(self) -> Self::Future;
}

impl<T> Resolve for Result<T, Error> {
    type Output = T;
    type Future = Ready<Result<T, Error>>;

    fn resolve(self) -> Self::Future {
        ready(self)
    }
}

impl Resolve for bool {
    type Output = bool;
    type Future = Ready<Result<bool, Error>>;

    fn resolve(self) -> Self::Future {
        ready(Ok(self))
    }
}

impl Resolve for () {
    type Output = ();
    type Future = Ready<Result<(), Error>>;

    fn resolve(self) -> Self::Future {
        ready(Ok(()))
    }
}

/// A future standing in for a callback result. Built with [`defer`].
#[derive(Debug, Clone)]
#[must_use = "a deferred value does nothing until it is resolved"]
pub struct Deferred<F>(F);

/// Mark a future as a pending callback result.
pub fn defer<F, T>(future: F) -> Deferred<F>
where
    F: Future<Output = Result<T, Error>>,
{
    Deferred(future)
}

impl<F, T> Resolve for Deferred<F>
where
    F: Future<Output = Result<T, Error>>,
{
    type Output = T;
    type Future = F;

    fn resolve(self) -> Self::Future {
        self.0
    }
}
