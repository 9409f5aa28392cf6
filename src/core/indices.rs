use std::collections::BTreeMap;

use hashbrown::HashMap;

use crate::{
    arrangement::Arrangement,
    types::{DateKey, Position},
};

/// Unordered key to insertion positions.
pub type VecIndex<K> = HashMap<K, Vec<Position>>;
/// Date-ordered index; positions under one date stay in insertion order.
pub type DateIndex = BTreeMap<DateKey, Vec<Position>>;

/// Composite `(place, type)` grouping key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// Exact place text.
    pub place: String,
    /// Exact type text.
    pub kind: String,
}

impl GroupKey {
    /// Builds a key from borrowed parts.
    pub fn new(place: &str, kind: &str) -> Self {
        Self {
            place: place.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Key under which `rec` is grouped.
    pub fn of(rec: &Arrangement) -> Self {
        Self::new(rec.place(), rec.kind())
    }
}
