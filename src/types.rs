//! Shared primitive keys and constants.

/// Caller-assigned arrangement identifier. Not required to be unique.
pub type ArrangementId = i32;
/// Opaque orderable date encoding, e.g. `YYYYMMDD`.
pub type DateKey = i32;
/// Opaque orderable time-of-day encoding, e.g. `HHMM`.
pub type TimeKey = i32;
/// Position of a record in the register's insertion order.
pub type Position = usize;

/// Largest raw date difference still treated as "the same date".
pub const SAME_DATE_WINDOW: i64 = 2359;
