use std::fmt;
use std::iter::FusedIterator;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::BookingError;
use crate::interval::Interval;
use crate::node::{Link, Node};

/// A calendar of pairwise non-overlapping half-open intervals.
///
/// Intervals are stored in an unbalanced binary search tree: an interval that
/// ends at or before a node's start goes to its left, one that starts at or
/// after a node's end goes to its right, and anything else overlaps the node
/// and is refused. Booked intervals can never be moved or removed.
///
/// Booking `n` intervals in sorted order degenerates the tree into a list of
/// depth `n`. Bookings stay correct in that case, only slower.
pub struct Calendar<K> {
    root: Link<K>,
    size: usize,
}

impl<K> Calendar<K> {
    /// Creates an empty calendar.
    pub fn new() -> Calendar<K> {
        Calendar {
            root: None,
            size: 0,
        }
    }

    /// Number of booked intervals.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of nodes on the longest root-to-leaf path, 0 for an empty calendar.
    ///
    /// ```
    /// use booking_calendar::Calendar;
    ///
    /// let mut calendar = Calendar::new();
    /// for hour in 0..5 {
    ///     calendar.book(hour, hour + 1).unwrap();
    /// }
    ///
    /// // Sorted bookings give a fully skewed tree.
    /// assert_eq!(calendar.depth(), 5);
    /// ```
    pub fn depth(&self) -> usize {
        self.root.as_deref().map_or(0, Node::depth)
    }

    /// Iterates over the booked intervals in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref(), self.size)
    }

    /// Booked intervals in pre-order; booking them again in this order
    /// rebuilds the exact same tree.
    #[cfg(feature = "serde")]
    fn pre_order(&self) -> impl Iterator<Item = &Interval<K>> {
        let mut stack: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
            Some(&node.key)
        })
    }
}

impl<K> Calendar<K>
where
    K: Ord,
{
    /// Builds a calendar by booking every `(start, end)` pair in order.
    ///
    /// Unlike [`Calendar::book`], an overlap is an error here: it means the
    /// batch itself contains a double booking.
    ///
    /// ```
    /// use booking_calendar::{BookingError, Calendar};
    ///
    /// let calendar = Calendar::from_intervals([(1, 3), (3, 5)]).unwrap();
    /// assert_eq!(calendar.len(), 2);
    ///
    /// assert_eq!(
    ///     Calendar::from_intervals([(1, 3), (2, 5)]).err(),
    ///     Some(BookingError::DoubleBooking { start: 2, end: 5 })
    /// );
    /// ```
    pub fn from_intervals<I>(intervals: I) -> Result<Calendar<K>, BookingError<K>>
    where
        I: IntoIterator<Item = (K, K)>,
    {
        let mut calendar = Calendar::new();
        for (start, end) in intervals {
            let candidate = Interval::new(start, end)?;
            if let Err(rejected) = calendar.insert(candidate) {
                let (start, end) = rejected.into_inner();
                return Err(BookingError::DoubleBooking { start, end });
            }
        }

        Ok(calendar)
    }

    /// Books `[start, end)` unless it overlaps an already booked interval.
    ///
    /// Returns `Ok(true)` if the interval was booked and `Ok(false)` if it
    /// overlaps a previous booking, in which case the calendar is unchanged.
    /// An empty or inverted interval (`start >= end`) is an error and never
    /// reaches the tree.
    ///
    /// ```
    /// use booking_calendar::{BookingError, Calendar};
    ///
    /// let mut calendar = Calendar::new();
    /// assert_eq!(calendar.book(2, 3), Ok(true));
    /// assert_eq!(calendar.book(3, 4), Ok(true));
    /// assert_eq!(calendar.book(2, 3), Ok(false));
    /// assert_eq!(
    ///     calendar.book(7, 6),
    ///     Err(BookingError::InvalidInterval { start: 7, end: 6 })
    /// );
    /// ```
    pub fn book(&mut self, start: K, end: K) -> Result<bool, BookingError<K>> {
        let candidate = match Interval::new(start, end) {
            Ok(candidate) => candidate,
            Err(err) => {
                debug!(booked = self.size, "refused invalid interval");
                return Err(err);
            }
        };

        match self.insert(candidate) {
            Ok(()) => {
                trace!(booked = self.size, "booked interval");
                Ok(true)
            }
            Err(_) => {
                debug!(booked = self.size, "refused overlapping interval");
                Ok(false)
            }
        }
    }

    /// First booked interval that keeps `[start, end)` from being booked, if any.
    ///
    /// ```
    /// use booking_calendar::{Calendar, Interval};
    ///
    /// let mut calendar = Calendar::new();
    /// calendar.book(5, 10).unwrap();
    ///
    /// assert_eq!(calendar.conflict(8, 13), Ok(Some(&Interval::new(5, 10).unwrap())));
    /// assert_eq!(calendar.conflict(10, 15), Ok(None));
    /// ```
    pub fn conflict(&self, start: K, end: K) -> Result<Option<&Interval<K>>, BookingError<K>> {
        let candidate = Interval::new(start, end)?;
        Ok(self
            .root
            .as_deref()
            .and_then(|root| root.find_conflict(&candidate)))
    }

    /// Whether [`Calendar::book`] would accept `[start, end)`.
    pub fn is_available(&self, start: K, end: K) -> Result<bool, BookingError<K>> {
        Ok(self.conflict(start, end)?.is_none())
    }

    fn insert(&mut self, candidate: Interval<K>) -> Result<(), Interval<K>> {
        match self.root {
            None => self.root = Some(Box::new(Node::new(candidate))),
            Some(ref mut root) => root.place(candidate)?,
        }
        self.size += 1;

        Ok(())
    }
}

impl<K> Default for Calendar<K> {
    fn default() -> Calendar<K> {
        Calendar::new()
    }
}

impl<K> Drop for Calendar<K> {
    fn drop(&mut self) {
        // Boxes are unlinked one at a time so that dropping a skewed tree
        // does not recurse once per level.
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K> PartialEq for Calendar<K>
where
    K: PartialEq,
{
    /// Two calendars are equal when they hold the same intervals, whatever the
    /// shape of their trees.
    fn eq(&self, other: &Calendar<K>) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<K> Eq for Calendar<K> where K: Eq {}

impl<K> fmt::Debug for Calendar<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> fmt::Display for Calendar<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, interval) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", interval)?;
        }
        write!(f, "}}")
    }
}

impl<K> TryFrom<Vec<(K, K)>> for Calendar<K>
where
    K: Ord,
{
    type Error = BookingError<K>;

    fn try_from(intervals: Vec<(K, K)>) -> Result<Self, Self::Error> {
        Calendar::from_intervals(intervals)
    }
}

impl<'a, K> IntoIterator for &'a Calendar<K> {
    type Item = &'a Interval<K>;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<K> Serialize for Calendar<K>
where
    K: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.pre_order())
    }
}

#[cfg(feature = "serde")]
impl<'de, K> Deserialize<'de> for Calendar<K>
where
    K: Ord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let intervals = Vec::<Interval<K>>::deserialize(deserializer)?;
        Calendar::from_intervals(intervals.into_iter().map(Interval::into_inner))
            .map_err(de::Error::custom)
    }
}

/// In-order iterator over the intervals of a [`Calendar`], created by
/// [`Calendar::iter`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn new(root: Option<&'a Node<K>>, len: usize) -> Iter<'a, K> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);

        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a Interval<K>;

    fn next(&mut self) -> Option<&'a Interval<K>> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;

        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
