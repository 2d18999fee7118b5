//! Implementation of a booking calendar ([`calendar::Calendar`]) over half-open
//! intervals `[start, end)`. An interval is accepted only if it does not overlap
//! any interval booked before it; two intervals sharing a single boundary point
//! (e.g. `[2, 3)` and `[3, 4)`) do not overlap.
//!
//! Booked intervals are kept in an unbalanced binary search tree ordered by
//! non-overlap: an interval goes left of a node when it ends at or before the
//! node's start, right when it starts at or after the node's end, and is
//! rejected otherwise. There is no rebalancing, so booking intervals in sorted
//! order yields a fully skewed tree; every walk over the tree is iterative so
//! such trees stay usable at any depth.
//!
//! ```
//! use booking_calendar::Calendar;
//!
//! let mut calendar = Calendar::new();
//! assert_eq!(calendar.book(5, 10), Ok(true));
//! assert_eq!(calendar.book(8, 13), Ok(false));
//! assert_eq!(calendar.book(10, 15), Ok(true));
//! assert!(calendar.book(4, 4).is_err());
//! ```
//!
//! Note that any type satisfying the [`Ord`] trait can be used as a bound.

/// A calendar of non-overlapping intervals.
pub mod calendar;
pub mod error;
pub mod interval;
mod node;

pub use crate::calendar::Calendar;
pub use crate::error::BookingError;
pub use crate::interval::Interval;
