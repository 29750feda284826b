//! Operations that drive a traversal and produce a concrete result.
//!
//! Each function starts one cursor, pulls it until it has an answer, and drops it. The
//! short-circuiting ones ([`find`], [`some`], [`every`], [`reduce_until`], ...) stop
//! pulling the moment the answer is known, so nothing past that point is produced.
//!
//! Callbacks follow the same `(value, index, &source)` contract as the lazy combinators,
//! but may be `FnMut` since a terminal operation runs exactly once.

use crate::{
    cursor::{Cursor, Sequence},
    error::Error,
    outcome::Outcome,
    resolve::Resolve,
    step::Step,
};

/// Pull `cursor` dry, appending every value to `out`.
pub(crate) async fn drain_into<C: Cursor>(
    cursor: &mut C,
    out: &mut Vec<C::Item>,
) -> Result<Outcome, Error> {
    loop {
        match cursor.next().await {
            Step::Yielded(value) => out.push(value),
            Step::Complete(done) => return done,
        }
    }
}

/// Collect every value of `seq`, in order.
pub async fn to_vec<S: Sequence>(seq: &S) -> Result<Vec<S::Item>, Error> {
    let mut out = Vec::new();
    drain_into(&mut seq.cursor(), &mut out).await?;
    Ok(out)
}

/// Fold `seq` from left to right: `acc = f(acc, &value, index, seq)`.
///
/// `init` may itself be deferred.
///
/// ```rust
/// use lazyseq::{Error, reduce};
///
/// # pollster::block_on(async {
/// let sum = reduce(&vec![1, 2, 3, 4, 5], |acc, x, _, _| Ok(acc + x), Ok::<_, Error>(0)).await;
/// assert_eq!(sum.unwrap(), 15);
/// # });
/// ```
pub async fn reduce<S, F, R, I, A>(seq: &S, mut f: F, init: I) -> Result<A, Error>
where
    S: Sequence,
    F: FnMut(A, &S::Item, usize, &S) -> R,
    R: Resolve<Output = A>,
    I: Resolve<Output = A>,
{
    let mut acc = init.resolve().await?;
    let mut cursor = seq.cursor();
    let mut index = 0;
    loop {
        match cursor.next().await {
            Step::Yielded(value) => {
                acc = f(acc, &value, index, seq).resolve().await?;
                index += 1;
            }
            Step::Complete(done) => {
                done?;
                return Ok(acc);
            }
        }
    }
}

/// Like [`reduce`], returning as soon as `stop(&acc, &value, index, seq)` holds after a
/// fold step. The source is not pulled again once that happens.
///
/// ```rust
/// use lazyseq::{Error, reduce_until};
///
/// # pollster::block_on(async {
/// let seq = vec![1, 2, 3, 4, 5];
/// let acc = reduce_until(&seq, |acc, x, _, _| Ok(acc + x), Ok::<_, Error>(0), |acc, _, _, _| *acc > 6)
///     .await
///     .unwrap();
/// assert_eq!(acc, 10);
/// # });
/// ```
pub async fn reduce_until<S, F, R, I, A, P, Q>(
    seq: &S,
    mut f: F,
    init: I,
    mut stop: P,
) -> Result<A, Error>
where
    S: Sequence,
    F: FnMut(A, &S::Item, usize, &S) -> R,
    R: Resolve<Output = A>,
    I: Resolve<Output = A>,
    P: FnMut(&A, &S::Item, usize, &S) -> Q,
    Q: Resolve<Output = bool>,
{
    let mut acc = init.resolve().await?;
    let mut cursor = seq.cursor();
    let mut index = 0;
    loop {
        match cursor.next().await {
            Step::Yielded(value) => {
                acc = f(acc, &value, index, seq).resolve().await?;
                if stop(&acc, &value, index, seq).resolve().await? {
                    tracing::trace!(index, "reduce short-circuited");
                    return Ok(acc);
                }
                index += 1;
            }
            Step::Complete(done) => {
                done?;
                return Ok(acc);
            }
        }
    }
}

/// The first value for which `f(&value, index, seq)` holds, or `None`.
pub async fn find<S, F, R>(seq: &S, mut f: F) -> Result<Option<S::Item>, Error>
where
    S: Sequence,
    F: FnMut(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    let mut cursor = seq.cursor();
    let mut index = 0;
    loop {
        match cursor.next().await {
            Step::Yielded(value) => {
                if f(&value, index, seq).resolve().await? {
                    return Ok(Some(value));
                }
                index += 1;
            }
            Step::Complete(done) => {
                done?;
                return Ok(None);
            }
        }
    }
}

/// The first value of `seq`, or `None` when it is empty. Pulls exactly once.
pub async fn first<S: Sequence>(seq: &S) -> Result<Option<S::Item>, Error> {
    match seq.cursor().next().await {
        Step::Yielded(value) => Ok(Some(value)),
        Step::Complete(done) => done.map(|_| None),
    }
}

/// The first value matching `predicate`, or `None`. Same as [`find`].
pub async fn first_where<S, F, R>(seq: &S, predicate: F) -> Result<Option<S::Item>, Error>
where
    S: Sequence,
    F: FnMut(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    find(seq, predicate).await
}

/// The final value of `seq`, or `None` when it is empty. Drains the whole source.
pub async fn last<S: Sequence>(seq: &S) -> Result<Option<S::Item>, Error> {
    last_where(seq, |_, _, _| true).await
}

/// The final value matching `predicate`, or `None`. Drains the whole source.
pub async fn last_where<S, F, R>(seq: &S, mut predicate: F) -> Result<Option<S::Item>, Error>
where
    S: Sequence,
    F: FnMut(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    let mut cursor = seq.cursor();
    let mut index = 0;
    let mut found = None;
    loop {
        match cursor.next().await {
            Step::Yielded(value) => {
                if predicate(&value, index, seq).resolve().await? {
                    found = Some(value);
                }
                index += 1;
            }
            Step::Complete(done) => {
                done?;
                return Ok(found);
            }
        }
    }
}

/// Whether any value satisfies `f`. Stops at the first that does.
pub async fn some<S, F, R>(seq: &S, mut f: F) -> Result<bool, Error>
where
    S: Sequence,
    F: FnMut(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    let mut cursor = seq.cursor();
    let mut index = 0;
    loop {
        match cursor.next().await {
            Step::Yielded(value) => {
                if f(&value, index, seq).resolve().await? {
                    return Ok(true);
                }
                index += 1;
            }
            Step::Complete(done) => {
                done?;
                return Ok(false);
            }
        }
    }
}

/// Whether every value satisfies `f`. Stops at the first that does not.
pub async fn every<S, F, R>(seq: &S, mut f: F) -> Result<bool, Error>
where
    S: Sequence,
    F: FnMut(&S::Item, usize, &S) -> R,
    R: Resolve<Output = bool>,
{
    let mut cursor = seq.cursor();
    let mut index = 0;
    loop {
        match cursor.next().await {
            Step::Yielded(value) => {
                if !f(&value, index, seq).resolve().await? {
                    return Ok(false);
                }
                index += 1;
            }
            Step::Complete(done) => {
                done?;
                return Ok(true);
            }
        }
    }
}

/// Whether `seq` contains a value equal to `needle`.
pub async fn includes<S>(seq: &S, needle: &S::Item) -> Result<bool, Error>
where
    S: Sequence,
    S::Item: PartialEq,
{
    some(seq, |value, _, _| value == needle).await
}

/// Hand every value to `f(value, index)` and report how the traversal ended.
///
/// This is the driver to use when the [`Outcome`] matters, for instance to read the
/// payload of an [`exit_with`](crate::exit_with).
///
/// ```rust
/// use lazyseq::{Payload, exit_with, for_each};
///
/// # pollster::block_on(async {
/// let mut seen = Vec::new();
/// let seq = exit_with(vec![1, 2, 3], |x, _, _| *x == 3, Payload::new("three"));
/// let outcome = for_each(&seq, |x, _| seen.push(x)).await.unwrap();
///
/// assert_eq!(seen, vec![1, 2]);
/// assert_eq!(outcome.payload().and_then(|p| p.downcast_ref::<&str>()), Some(&"three"));
/// # });
/// ```
pub async fn for_each<S, F, R>(seq: &S, mut f: F) -> Result<Outcome, Error>
where
    S: Sequence,
    F: FnMut(S::Item, usize) -> R,
    R: Resolve<Output = ()>,
{
    let mut cursor = seq.cursor();
    let mut index = 0;
    loop {
        match cursor.next().await {
            Step::Yielded(value) => {
                f(value, index).resolve().await?;
                index += 1;
            }
            Step::Complete(done) => return done,
        }
    }
}
