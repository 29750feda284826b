use crate::{
    cursor::{Cursor, Pull, Sequence, finished},
    step::Step,
};

/// Runs one sequence to completion, then another.
///
/// Created by [`concat`].
#[derive(Clone)]
pub struct Concat<A, B> {
    first: A,
    second: B,
}

/// Create a sequence yielding every value of `first`, then every value of `second`.
///
/// `second` is not started until `first` has completed. A failure in `first` ends the
/// traversal without starting `second`.
///
/// ```rust
/// use lazyseq::{concat, to_vec};
///
/// # pollster::block_on(async {
/// let seq = concat(vec![1, 2, 3, 4, 5], [6, 7, 8]);
/// assert_eq!(to_vec(&seq).await.unwrap(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
/// # });
/// ```
pub fn concat<A, B>(first: A, second: B) -> Concat<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    Concat { first, second }
}

impl<A, B> Sequence for Concat<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;
    type Cursor = ConcatCursor<A, B>;

    fn cursor(&self) -> Self::Cursor {
        ConcatCursor(ConcatState::OnFirst(
            self.first.cursor(),
            self.second.clone(),
        ))
    }
}

enum ConcatState<A: Sequence, B: Sequence> {
    OnFirst(A::Cursor, B),
    OnSecond(B::Cursor),
    Done,
}

pub struct ConcatCursor<A: Sequence, B: Sequence>(ConcatState<A, B>);

impl<A, B> Cursor for ConcatCursor<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;

    async fn next(&mut self) -> Pull<Self::Item> {
        loop {
            match std::mem::replace(&mut self.0, ConcatState::Done) {
                ConcatState::OnFirst(mut first, second) => match first.next().await {
                    Step::Yielded(value) => {
                        self.0 = ConcatState::OnFirst(first, second);
                        return Step::Yielded(value);
                    }
                    // the first cursor is dropped here, before the second one starts
                    Step::Complete(Ok(_)) => self.0 = ConcatState::OnSecond(second.cursor()),
                    Step::Complete(Err(e)) => return Step::Complete(Err(e)),
                },
                ConcatState::OnSecond(mut second) => {
                    let step = second.next().await;
                    if step.is_yielded() {
                        self.0 = ConcatState::OnSecond(second);
                    }
                    return step;
                }
                ConcatState::Done => return finished(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        combinators::{exit, map},
        error::Error,
        source::empty,
        terminal::to_vec,
    };
    use pollster::block_on;

    #[test]
    fn test_concat_with_empty_sides() {
        let left = concat(empty::<i32>(), vec![1, 2]);
        let right = concat(vec![1, 2], empty());
        assert_eq!(block_on(to_vec(&left)).unwrap(), vec![1, 2]);
        assert_eq!(block_on(to_vec(&right)).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_concat_continues_after_first_stops_early() {
        let first = exit(vec![1, 2, 3], |x, _, _| *x == 2);
        let seq = concat(first, vec![9]);
        assert_eq!(block_on(to_vec(&seq)).unwrap(), vec![1, 9]);
    }

    #[test]
    fn test_concat_failure_in_first_skips_second() {
        let failing = map(vec![1, 2], |x, _, _| {
            if x == 2 {
                Err(Error::callback("bad"))
            } else {
                Ok(x)
            }
        });
        let seq = concat(failing, vec![3]);
        let mut cursor = seq.cursor();

        block_on(async {
            assert_eq!(cursor.next().await.unwrap_yielded(), 1);
            assert!(cursor.next().await.unwrap_complete().is_err());
            assert!(cursor.next().await.unwrap_complete().is_ok());
        });
    }
}
