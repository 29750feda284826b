/// Result of pulling a cursor once: either the next value or the end of the traversal.
///
/// `Step` plays the role `Option` plays for [`Iterator::next`], except that the end of a
/// traversal carries a value of its own. Cursors use `Step<T, Result<Outcome, Error>>`
/// (spelled [`Pull<T>`](crate::Pull)) so that failure and early exit are part of the
/// completion rather than extra yielded items.
///
/// # Examples
///
/// ```rust
/// use lazyseq::Step;
///
/// let pulled: Step<i32, &str> = Step::Yielded(42);
/// let finished: Step<i32, &str> = Step::Complete("finished");
///
/// assert_eq!(pulled.unwrap_yielded(), 42);
/// assert!(finished.is_complete());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<Y, D> {
    /// The cursor produced a value and can be pulled again
    Yielded(Y),
    /// The traversal is over
    Complete(D),
}

impl<Y, D> Step<Y, D> {
    /// Returns `true` if the step is `Yielded`.
    #[inline]
    pub const fn is_yielded(&self) -> bool {
        matches!(self, Step::Yielded(_))
    }

    /// Returns `true` if the step is `Complete`.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }

    /// Returns the yielded value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Complete`.
    #[inline]
    pub fn unwrap_yielded(self) -> Y {
        match self {
            Step::Yielded(y) => y,
            Step::Complete(_) => panic!("called `Step::unwrap_yielded()` on a `Complete` value"),
        }
    }

    /// Returns the completion value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Yielded`.
    #[inline]
    pub fn unwrap_complete(self) -> D {
        match self {
            Step::Yielded(_) => panic!("called `Step::unwrap_complete()` on a `Yielded` value"),
            Step::Complete(d) => d,
        }
    }
}
