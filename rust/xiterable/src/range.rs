//! Arithmetic progressions: the `range*` factories.
//!
//! Element values are generic over [`RangeValue`], so built-in integers and
//! (with the `bigint` feature) `num_bigint::BigInt` share one implementation.
//! The length is `ceil((end - begin) / step)` clamped at zero, and element `n`
//! is `begin + step * n`; both are computed without iterating. A progression
//! also ends where the next value would not fit `T`, so the "endless"
//! factories over narrow types have an exact length.

use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, FromPrimitive, One, ToPrimitive, Zero};
use xiterable_common::{Result, verify_range};

use crate::{
    LazySequence, Length,
    source::{Accessor, Producer},
};

/// Integer types a range can count in.
pub trait RangeValue:
    Integer + CheckedAdd + CheckedSub + CheckedMul + FromPrimitive + ToPrimitive + Clone + 'static
{
}

impl<T> RangeValue for T where
    T: Integer
        + CheckedAdd
        + CheckedSub
        + CheckedMul
        + FromPrimitive
        + ToPrimitive
        + Clone
        + 'static
{
}

/// `0, 1, 2, ...` up to the largest value of `T`.
///
/// The length is [`Length::Infinite`] when more than `usize::MAX` values fit
/// (`u64`, `u128`, `i128`, big integers on 64-bit targets) and exact
/// otherwise, e.g. 256 for `u8`.
pub fn range<T: RangeValue>() -> LazySequence<T> {
    progression(T::zero(), None, T::one())
}

/// `0, 1, ..., end - 1`.
pub fn range_to<T: RangeValue>(end: T) -> LazySequence<T> {
    progression(T::zero(), Some(end), T::one())
}

/// `begin, begin + 1, ..., end - 1`; empty when `end <= begin`.
pub fn range_between<T: RangeValue>(begin: T, end: T) -> LazySequence<T> {
    progression(begin, Some(end), T::one())
}

/// `begin, begin + step, ...` while short of `end`.
///
/// A negative `step` counts down towards `end`. A zero `step` is a range
/// error.
///
/// ```
/// use xiterable::range_step;
///
/// let odd = range_step(1, 10, 2).unwrap();
/// assert_eq!(odd.to_vec().unwrap(), vec![1, 3, 5, 7, 9]);
/// ```
pub fn range_step<T: RangeValue>(begin: T, end: T, step: T) -> Result<LazySequence<T>> {
    verify_range!("range_step", !step.is_zero(), "step must not be zero");
    Ok(progression(begin, Some(end), step))
}

/// `begin, begin + step, ...` until the values leave `T`. A zero `step` is a
/// range error.
pub fn range_from<T: RangeValue>(begin: T, step: T) -> Result<LazySequence<T>> {
    verify_range!("range_from", !step.is_zero(), "step must not be zero");
    Ok(progression(begin, None, step))
}

fn progression<T: RangeValue>(begin: T, end: Option<T>, step: T) -> LazySequence<T> {
    let length = match &end {
        Some(end) => span(&begin, end, &step),
        None => count_while(|n| advance(&begin, &step, n).is_some())
            .map_or(Length::Infinite, Length::Exact),
    };
    let producer = {
        let (begin, end, step) = (begin.clone(), end.clone(), step.clone());
        Producer::new(move || Steps {
            next: Some(begin.clone()),
            end: end.clone(),
            step: step.clone(),
        })
    };
    let accessor = Accessor::new(move |n| {
        let value = advance(&begin, &step, n)?;
        match &end {
            Some(end) if !short_of(&value, end, &step) => None,
            _ => Some(value),
        }
    });
    LazySequence::from_parts("range", producer, length, Some(accessor))
}

/// Element count of `[begin, end)` in strides of `step`. Counts that do not
/// fit `usize` are reported as unknown.
fn span<T: RangeValue>(begin: &T, end: &T, step: &T) -> Length {
    if !short_of(begin, end, step) {
        return Length::EMPTY;
    }
    let count = match end.checked_sub(begin) {
        Some(distance) => Integer::div_ceil(&distance, step).to_usize(),
        // The distance itself overflows `T`, e.g. `i8::MIN..i8::MAX`.
        None => count_while(|n| {
            advance(begin, step, n).is_some_and(|value| short_of(&value, end, step))
        }),
    };
    count.map_or(Length::Unknown, Length::Exact)
}

/// `from + step * n`, or `None` when it does not fit `T`.
///
/// The product is split in halves when it overflows on its own, so every
/// intermediate value lies between `from` and the result.
fn advance<T: RangeValue>(from: &T, step: &T, n: usize) -> Option<T> {
    let direct = T::from_usize(n)
        .and_then(|n| step.checked_mul(&n))
        .and_then(|offset| from.checked_add(&offset));
    if direct.is_some() || n <= 1 {
        return direct;
    }
    let half = n / 2;
    advance(&advance(from, step, half)?, step, n - half)
}

/// The number of leading `n` for which `holds(n)`, given that `holds(0)` is
/// true and `holds` flips at most once. `None` when it holds at `usize::MAX`.
fn count_while(holds: impl Fn(usize) -> bool) -> Option<usize> {
    if holds(usize::MAX) {
        return None;
    }
    let (mut low, mut high) = (0, usize::MAX);
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if holds(mid) {
            low = mid;
        } else {
            high = mid;
        }
    }
    Some(high)
}

#[inline]
fn short_of<T: RangeValue>(value: &T, end: &T, step: &T) -> bool {
    if *step > T::zero() {
        value < end
    } else {
        value > end
    }
}

struct Steps<T> {
    next: Option<T>,
    end: Option<T>,
    step: T,
}

impl<T: RangeValue> Iterator for Steps<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next.take()?;
        if let Some(end) = &self.end {
            if !short_of(&current, end, &self.step) {
                return None;
            }
        }
        // Stops after the largest representable value.
        self.next = current.checked_add(&self.step);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_to() {
        let seq = range_to(4);
        assert_eq!(seq.len(), Length::Exact(4));
        assert_eq!(seq.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(
            seq.reversed().unwrap().iter().collect::<Vec<_>>(),
            vec![3, 2, 1, 0]
        );
    }

    #[test]
    fn test_endless_range() {
        let seq = range::<u64>();
        assert_eq!(seq.len(), Length::Infinite);
        assert_eq!(seq.at(1_000_000_000).unwrap(), Some(1_000_000_000));
        assert_eq!(seq.take(3).iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(seq.reversed().unwrap_err().is_range_error());
    }

    #[test]
    fn test_range_step() {
        let seq = range_step(0, 10, 3).unwrap();
        assert_eq!(seq.len(), Length::Exact(4));
        assert_eq!(seq.iter().collect::<Vec<_>>(), vec![0, 3, 6, 9]);
        assert_eq!(seq.at(-1).unwrap(), Some(9));
        assert_eq!(seq.at(4).unwrap(), None);

        let down = range_step(10, 0, -3).unwrap();
        assert_eq!(down.len(), Length::Exact(4));
        assert_eq!(down.iter().collect::<Vec<_>>(), vec![10, 7, 4, 1]);
        assert_eq!(down.at(3).unwrap(), Some(1));

        assert_eq!(range_step(0, 10, -1).unwrap().len(), Length::EMPTY);
        assert!(range_step(0, 10, 0).unwrap_err().is_range_error());
    }

    #[test]
    fn test_range_between_empty() {
        let seq = range_between(5, 2);
        assert!(seq.is_empty());
        assert_eq!(seq.iter().next(), None);
        assert_eq!(seq.at(0).unwrap(), None);
    }

    #[test]
    fn test_range_from() {
        let seq = range_from(-5i128, 5).unwrap();
        assert_eq!(seq.len(), Length::Infinite);
        assert_eq!(seq.take(3).iter().collect::<Vec<_>>(), vec![-5, 0, 5]);
        assert_eq!(seq.at(100).unwrap(), Some(495));
        assert!(range_from(1, 0).unwrap_err().is_range_error());
    }

    #[test]
    fn test_narrow_types() {
        let seq = range::<u8>();
        assert_eq!(seq.len(), Length::Exact(256));
        assert_eq!(seq.iter().count(), 256);
        assert_eq!(seq.at(255).unwrap(), Some(255));
        assert_eq!(seq.at(256).unwrap(), None);
        assert_eq!(seq.reversed().unwrap().at(0).unwrap(), Some(255));
        assert_eq!(seq.to_vec().unwrap().len(), 256);

        let stepped = range_from(100u8, 50).unwrap();
        assert_eq!(stepped.len(), Length::Exact(3));
        assert_eq!(stepped.to_vec().unwrap(), vec![100, 150, 200]);

        let down = range_from(0i8, -1).unwrap();
        assert_eq!(down.len(), Length::Exact(129));
        assert_eq!(down.at(-1).unwrap(), Some(i8::MIN));

        assert_eq!(range::<i32>().len(), Length::Exact(1 << 31));
        assert_eq!(range::<u64>().len(), Length::Infinite);
    }

    #[test]
    fn test_wide_span_in_narrow_type() {
        let wide = range_between(i8::MIN, i8::MAX);
        assert_eq!(wide.len(), Length::Exact(255));
        assert_eq!(wide.iter().count(), 255);
        assert_eq!(wide.at(200).unwrap(), Some(72));
        assert_eq!(wide.at(-1).unwrap(), Some(126));
        assert_eq!(wide.at(255).unwrap(), None);

        let odd = range_step(i8::MIN + 1, i8::MAX, 2).unwrap();
        assert_eq!(odd.len(), Length::Exact(127));
        assert_eq!(odd.iter().last(), Some(125));
    }

    #[test]
    fn test_empty_unsigned_ranges() {
        let seq = range_between(5u8, 2u8);
        assert_eq!(seq.len(), Length::EMPTY);
        assert!(seq.reduce(|a, v, _, _| a + v).unwrap_err().is_type_error());
        assert_eq!(seq.join(",").unwrap(), "");
        assert_eq!(seq.to_vec().unwrap(), Vec::<u8>::new());
        assert_eq!(seq.reversed().unwrap().iter().count(), 0);

        let seq = range_step(10u32, 0, 1).unwrap();
        assert_eq!(seq.len(), Length::EMPTY);
        assert_eq!(seq.iter().next(), None);
        assert_eq!(range_to(0u64).len(), Length::EMPTY);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_length_beyond_isize() {
        let seq = range_to(u64::MAX);
        let n = usize::MAX;
        assert_eq!(seq.len(), Length::Exact(n));
        assert_eq!(seq.at(-1).unwrap(), Some(u64::MAX - 1));
        assert_eq!(seq.at(-3).unwrap(), Some(u64::MAX - 3));

        let tail = seq.slice(-1..).unwrap();
        assert_eq!(tail.len(), Length::Exact(1));
        assert_eq!(tail.at(0).unwrap(), Some(u64::MAX - 1));
        let window = seq.slice(-3..=-2).unwrap();
        assert_eq!(window.len(), Length::Exact(2));
        assert_eq!(window.at(-1).unwrap(), Some(u64::MAX - 2));

        assert_eq!(
            seq.last_index_of(&(u64::MAX - 2), Some(-1)).unwrap(),
            Some(n - 2)
        );
    }

    #[cfg(feature = "bigint")]
    #[test]
    fn test_bigint_range() {
        use num_bigint::BigInt;

        let base = BigInt::from(10).pow(30);
        let seq = range_between(base.clone(), base.clone() + 3);
        assert_eq!(seq.len(), Length::Exact(3));
        assert_eq!(seq.at(-1).unwrap(), Some(base.clone() + 2));
        assert_eq!(
            seq.iter().collect::<Vec<_>>(),
            vec![base.clone(), base.clone() + 1, base.clone() + 2]
        );

        let huge = range_to(BigInt::from(10).pow(40));
        assert_eq!(huge.len(), Length::Unknown);
        assert_eq!(huge.at(7).unwrap(), Some(BigInt::from(7)));
    }
}
