use std::cmp::Ordering;
use std::fmt::Debug;

use num_traits::{Bounded, Zero};

/// A coordinate type an [`Interval`] can be positioned on.
///
/// Coordinates must be ordered, bounded and subtractable. Integer coordinates
/// saturate when subtracting, so a lower search bound never wraps around, and a
/// signed width that does not fit is clamped to `max_value()`.
pub trait Coordinate: Copy + PartialOrd + Debug + Zero + Bounded + Send + Sync {
    /// `self - rhs`, clamped at the smallest representable value.
    fn saturating_sub(self, rhs: Self) -> Self;

    /// A total order over all values of the type.
    fn total_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_int_coordinate {
    ($($t:ty),* $(,)?) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn saturating_sub(self, rhs: Self) -> Self {
                    <$t>::saturating_sub(self, rhs)
                }

                #[inline]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

macro_rules! impl_float_coordinate {
    ($($t:ty),* $(,)?) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn saturating_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    <$t>::total_cmp(self, other)
                }
            }
        )*
    };
}

impl_int_coordinate!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_float_coordinate!(f32, f64);

/// A half-open range `[start, end)` usable as an index key.
///
/// The `Ord` implementation must be consistent with `start`: keys sort by start
/// first, ties broken by end and then by anything else that keeps the order total.
/// Index queries binary search on that order.
pub trait Interval: Ord {
    type Coord: Coordinate;

    fn start(&self) -> Self::Coord;

    fn end(&self) -> Self::Coord;

    /// `end - start`. Clamped to zero for inverted unsigned intervals, and to
    /// `Coord::max_value()` for signed intervals wider than that.
    #[inline]
    fn width(&self) -> Self::Coord {
        self.end().saturating_sub(self.start())
    }

    /// Check if two intervals overlap
    #[inline]
    fn overlaps<O>(&self, other: &O) -> bool
    where
        O: Interval<Coord = Self::Coord> + ?Sized,
    {
        self.overlaps_range(other.start(), other.end())
    }

    /// Check if this interval overlaps `start .. end`
    #[inline]
    fn overlaps_range(&self, start: Self::Coord, end: Self::Coord) -> bool {
        self.start() < end && start < self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::models::Span;

    #[rstest]
    #[case(Span { start: 0u32, end: 10 }, Span { start: 5, end: 15 }, true)]
    #[case(Span { start: 0u32, end: 10 }, Span { start: 10, end: 15 }, false)]
    #[case(Span { start: 5u32, end: 15 }, Span { start: 0, end: 5 }, false)]
    #[case(Span { start: 0u32, end: 100 }, Span { start: 40, end: 41 }, true)]
    #[case(Span { start: 3u32, end: 4 }, Span { start: 3, end: 4 }, true)]
    fn test_overlaps(#[case] a: Span<u32>, #[case] b: Span<u32>, #[case] expected: bool) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[rstest]
    fn test_width_clamps_for_unsigned() {
        let inverted = Span { start: 10u32, end: 4 };
        assert_eq!(inverted.width(), 0);
    }

    #[rstest]
    fn test_width_signed_and_float() {
        assert_eq!(Span { start: -5i64, end: 5 }.width(), 10);
        assert_eq!(Span { start: 0.5f64, end: 2.0 }.width(), 1.5);
    }

    #[rstest]
    fn test_width_clamps_for_wide_signed() {
        assert_eq!(Span { start: -100i8, end: 100 }.width(), i8::MAX);
        assert_eq!(Span { start: i64::MIN, end: i64::MAX }.width(), i64::MAX);
    }

    #[rstest]
    fn test_saturating_sub() {
        assert_eq!(Coordinate::saturating_sub(3u32, 10), 0);
        assert_eq!(Coordinate::saturating_sub(i8::MIN + 1, 5), i8::MIN);
        assert_eq!(Coordinate::saturating_sub(1.0f32, 3.0), -2.0);
    }
}
