//! Errors raised by [`crate::Calendar`] and [`crate::Interval`].

/// Errors triggered while building intervals or booking them.
///
/// An overlap between a candidate and an already booked interval is *not* an
/// error for [`crate::Calendar::book`]; it is reported as `Ok(false)`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BookingError<K> {
    /// The interval is empty or inverted, i.e. `start >= end`.
    #[error("invalid interval: start must be strictly less than end")]
    InvalidInterval { start: K, end: K },
    /// A batch of intervals (see [`crate::Calendar::from_intervals`]) contains
    /// an interval overlapping one listed before it.
    #[error("interval overlaps an interval booked earlier in the batch")]
    DoubleBooking { start: K, end: K },
}

impl<K> BookingError<K> {
    /// Bounds of the interval that caused the error.
    pub fn bounds(&self) -> (&K, &K) {
        match self {
            BookingError::InvalidInterval { start, end }
            | BookingError::DoubleBooking { start, end } => (start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_does_not_require_display_bounds() {
        struct Opaque;
        let err = BookingError::InvalidInterval {
            start: Opaque,
            end: Opaque,
        };

        assert_eq!(
            err.to_string(),
            "invalid interval: start must be strictly less than end"
        );
    }

    #[test]
    fn bounds_are_exposed_for_every_variant() {
        let invalid = BookingError::InvalidInterval { start: 4, end: 2 };
        let overlap = BookingError::DoubleBooking { start: 1, end: 3 };

        assert_eq!(invalid.bounds(), (&4, &2));
        assert_eq!(overlap.bounds(), (&1, &3));
    }
}
