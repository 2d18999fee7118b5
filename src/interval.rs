//! Validated half-open intervals.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// A non-empty half-open interval `[start, end)`.
///
/// The only way to obtain an `Interval` is through [`Interval::new`] (or
/// deserialization, which goes through the same check), so `start < end`
/// always holds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawInterval<K>",
        bound(deserialize = "K: Ord + Deserialize<'de>")
    )
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<K> {
    start: K,
    end: K,
}

impl<K> Interval<K>
where
    K: Ord,
{
    /// Creates the interval `[start, end)`.
    ///
    /// ```
    /// use booking_calendar::{BookingError, Interval};
    ///
    /// assert!(Interval::new(2, 3).is_ok());
    /// assert_eq!(
    ///     Interval::new(3, 3),
    ///     Err(BookingError::InvalidInterval { start: 3, end: 3 })
    /// );
    /// ```
    pub fn new(start: K, end: K) -> Result<Self, BookingError<K>> {
        if start < end {
            Ok(Interval { start, end })
        } else {
            Err(BookingError::InvalidInterval { start, end })
        }
    }

    /// Whether `self` and `other` share at least one point.
    /// Intervals that only touch (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval<K>) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `self` lies entirely before `other`.
    pub fn is_before(&self, other: &Interval<K>) -> bool {
        self.end <= other.start
    }

    /// Whether `self` lies entirely after `other`.
    pub fn is_after(&self, other: &Interval<K>) -> bool {
        self.start >= other.end
    }
}

impl<K> Interval<K> {
    pub fn start(&self) -> &K {
        &self.start
    }

    pub fn end(&self) -> &K {
        &self.end
    }

    pub fn into_inner(self) -> (K, K) {
        (self.start, self.end)
    }
}

impl<K> fmt::Display for Interval<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawInterval<K> {
    start: K,
    end: K,
}

#[cfg(feature = "serde")]
impl<K> TryFrom<RawInterval<K>> for Interval<K>
where
    K: Ord,
{
    type Error = BookingError<K>;

    fn try_from(raw: RawInterval<K>) -> Result<Self, Self::Error> {
        Interval::new(raw.start, raw.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_inverted() {
        assert_eq!(
            Interval::new(5, 5),
            Err(BookingError::InvalidInterval { start: 5, end: 5 })
        );
        assert_eq!(
            Interval::new(9, 2),
            Err(BookingError::InvalidInterval { start: 9, end: 2 })
        );
        assert!(Interval::new(-1, 0).is_ok());
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = Interval::new(2, 3).unwrap();
        let b = Interval::new(3, 4).unwrap();

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Interval::new(5, 10).unwrap();
        let b = Interval::new(8, 13).unwrap();
        let inner = Interval::new(6, 7).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps(&inner));
        assert!(inner.overlaps(&a));
        assert!(a.overlaps(&a));
        assert!(!a.is_before(&b));
        assert!(!a.is_after(&b));
    }

    #[test]
    fn works_with_any_ord_type() {
        let morning = Interval::new("08:00", "12:00").unwrap();
        let lunch = Interval::new("12:00", "13:00").unwrap();

        assert!(morning.is_before(&lunch));
        assert_eq!(lunch.to_string(), "[12:00, 13:00)");
        assert_eq!(morning.into_inner(), ("08:00", "12:00"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates() {
        let ok: Interval<i32> = serde_json::from_str(r#"{"start":1,"end":2}"#).unwrap();
        assert_eq!(ok, Interval::new(1, 2).unwrap());

        let err = serde_json::from_str::<Interval<i32>>(r#"{"start":2,"end":1}"#);
        assert!(err.is_err());
    }
}
