use std::cmp::Ordering;
use std::fmt::{self, Display};

use crate::errors::RegionError;
use crate::models::interval::{Coordinate, Interval};

/// Represent a range from [start, end)
/// Inclusive start, exclusive of end
#[derive(Debug, Clone, Copy)]
pub struct Span<C>
where
    C: Coordinate,
{
    pub start: C,
    pub end: C,
}

impl<C> Span<C>
where
    C: Coordinate,
{
    /// Create a span, rejecting bounds where `end` precedes `start`.
    ///
    /// Unordered float bounds (NaN) are rejected as well.
    pub fn new(start: C, end: C) -> Result<Self, RegionError> {
        if start <= end {
            Ok(Span { start, end })
        } else {
            Err(RegionError::InvertedBounds(
                format!("{start:?}"),
                format!("{end:?}"),
            ))
        }
    }
}

impl<C> Interval for Span<C>
where
    C: Coordinate,
{
    type Coord = C;

    #[inline]
    fn start(&self) -> C {
        self.start
    }

    #[inline]
    fn end(&self) -> C {
        self.end
    }
}

impl<C> Ord for Span<C>
where
    C: Coordinate,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.start.total_cmp(&other.start) {
            Ordering::Equal => self.end.total_cmp(&other.end),
            ord => ord,
        }
    }
}

impl<C> PartialOrd for Span<C>
where
    C: Coordinate,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> PartialEq for Span<C>
where
    C: Coordinate,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C> Eq for Span<C> where C: Coordinate {}

impl<C> From<(C, C)> for Span<C>
where
    C: Coordinate,
{
    fn from((start, end): (C, C)) -> Self {
        Span { start, end }
    }
}

impl<C> Display for Span<C>
where
    C: Coordinate + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
