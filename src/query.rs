//! Numeric date-window matching and boundary ordering.
//!
//! Dates and times are compared as raw integers. "Same date" means the two
//! encodings differ by at most [`SAME_DATE_WINDOW`]; no calendar arithmetic
//! is involved.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{DateKey, SAME_DATE_WINDOW, TimeKey};

/// A `(date, time)` pair ordered by date, then time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Moment {
    /// Raw date key.
    pub date: DateKey,
    /// Raw time key.
    pub time: TimeKey,
}

impl Moment {
    /// Pairs a date and a time.
    pub fn new(date: DateKey, time: TimeKey) -> Self {
        Self { date, time }
    }
}

/// True when `|date - target| <= SAME_DATE_WINDOW`, computed without overflow.
pub fn within_date_window(date: DateKey, target: DateKey) -> bool {
    (i64::from(date) - i64::from(target)).abs() <= SAME_DATE_WINDOW
}

/// Inclusive range of date keys that pass [`within_date_window`] for `target`.
pub fn date_window_bounds(target: DateKey) -> (DateKey, DateKey) {
    let lo = (i64::from(target) - SAME_DATE_WINDOW).max(i64::from(DateKey::MIN));
    let hi = (i64::from(target) + SAME_DATE_WINDOW).min(i64::from(DateKey::MAX));
    (lo as DateKey, hi as DateKey)
}

/// Two boundary moments given in caller order, with the later one resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    first: Moment,
    second: Moment,
    first_is_later: bool,
}

impl TimeSpan {
    /// Resolves which boundary is later. Equal moments count as the second
    /// being later.
    pub fn new(first: Moment, second: Moment) -> Self {
        Self {
            first,
            second,
            first_is_later: first.cmp(&second) == Ordering::Greater,
        }
    }

    /// True when the first boundary was supplied as the later one.
    pub fn first_is_later(&self) -> bool {
        self.first_is_later
    }

    /// Intersection of both boundaries' date windows, or `None` if disjoint.
    pub fn candidate_dates(&self) -> Option<(DateKey, DateKey)> {
        let (lo1, hi1) = date_window_bounds(self.first.date);
        let (lo2, hi2) = date_window_bounds(self.second.date);
        let lo = lo1.max(lo2);
        let hi = hi1.min(hi2);
        (lo <= hi).then_some((lo, hi))
    }

    /// Membership test for a record date. Times never filter, they only
    /// decide the boundary order.
    pub fn contains(&self, date: DateKey) -> bool {
        let (d1, d2) = (self.first.date, self.second.date);
        if !within_date_window(date, d1) || !within_date_window(date, d2) {
            return false;
        }
        if self.first_is_later {
            date >= d1 || date <= d2
        } else {
            date <= d1 || date >= d2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_boundaries_are_inclusive() {
        assert!(within_date_window(2359, 0));
        assert!(within_date_window(-2359, 0));
        assert!(!within_date_window(2360, 0));
        assert!(!within_date_window(-2360, 0));
    }

    #[test]
    fn window_does_not_overflow_at_extremes() {
        assert!(!within_date_window(DateKey::MAX, DateKey::MIN));
        assert_eq!(date_window_bounds(DateKey::MAX), (DateKey::MAX - 2359, DateKey::MAX));
        assert_eq!(date_window_bounds(DateKey::MIN), (DateKey::MIN, DateKey::MIN + 2359));
    }

    #[test]
    fn later_boundary_uses_time_only_as_tiebreak() {
        assert!(!TimeSpan::new(Moment::new(100, 900), Moment::new(200, 800)).first_is_later());
        assert!(TimeSpan::new(Moment::new(200, 100), Moment::new(100, 2300)).first_is_later());
        assert!(TimeSpan::new(Moment::new(100, 900), Moment::new(100, 800)).first_is_later());
        assert!(!TimeSpan::new(Moment::new(100, 800), Moment::new(100, 800)).first_is_later());
    }

    #[test]
    fn span_contains_matches_both_window_and_side_rule() {
        // Second boundary later: keep date <= 100 or date >= 200.
        let span = TimeSpan::new(Moment::new(100, 900), Moment::new(200, 800));
        assert!(span.contains(100));
        assert!(span.contains(50));
        assert!(span.contains(200));
        assert!(span.contains(2000));
        assert!(!span.contains(150));
        assert!(!span.contains(2460));
        assert!(!span.contains(-2260));

        // First boundary later: keep date >= 200 or date <= 100.
        let span = TimeSpan::new(Moment::new(200, 800), Moment::new(100, 900));
        assert!(span.contains(250));
        assert!(span.contains(100));
        assert!(!span.contains(150));
    }

    #[test]
    fn candidate_dates_is_window_intersection() {
        let span = TimeSpan::new(Moment::new(100, 0), Moment::new(200, 0));
        assert_eq!(span.candidate_dates(), Some((200 - 2359, 100 + 2359)));

        let far = TimeSpan::new(Moment::new(0, 0), Moment::new(10_000, 0));
        assert_eq!(far.candidate_dates(), None);
    }
}
