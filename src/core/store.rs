use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    arrangement::Arrangement,
    core::indices::{DateIndex, GroupKey, VecIndex},
    query::{Moment, TimeSpan, date_window_bounds},
    types::{ArrangementId, DateKey, Position, TimeKey},
};

/// Version number written into [`RegisterSnapshotV1`].
pub const SNAPSHOT_FORMAT_VERSION: u16 = 1;

/// Failures of the non-query register surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// Snapshot carries a format version this build cannot read.
    UnsupportedSnapshotVersion(u16),
}

/// Serializable copy of a register's records in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSnapshotV1 {
    /// Payload format version.
    pub format_version: u16,
    /// Records in insertion order.
    pub records: Vec<Arrangement>,
}

/// Place, then type, then records sorted by `(date, time)`.
pub type GroupedArrangements = HashMap<String, HashMap<String, Vec<Arrangement>>>;

/// Append-only collection of arrangements with place, date and group indices.
///
/// Every query allocates its result; the `_cloned` variants hand out owned
/// copies that never alias the register's storage.
#[derive(Debug, Default)]
pub struct ArrangementRegister {
    records: Vec<Arrangement>,
    by_place: VecIndex<String>,
    by_date: DateIndex,
    by_group: VecIndex<GroupKey>,
}

impl ArrangementRegister {
    /// Empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a register, including every index, from a snapshot.
    pub fn from_snapshot(snapshot: RegisterSnapshotV1) -> Result<Self, RegisterError> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(RegisterError::UnsupportedSnapshotVersion(snapshot.format_version));
        }

        let mut register = Self::new();
        for rec in snapshot.records {
            register.add(rec);
        }
        Ok(register)
    }

    /// Copies all records into a snapshot.
    pub fn export_snapshot(&self) -> RegisterSnapshotV1 {
        RegisterSnapshotV1 {
            format_version: SNAPSHOT_FORMAT_VERSION,
            records: self.all_cloned(),
        }
    }

    /// Appends `arrangement` and returns its insertion position.
    pub fn add(&mut self, arrangement: Arrangement) -> Position {
        let position = self.records.len();
        self.insert_indices(&arrangement, position);
        trace!(id = arrangement.id(), position, "arrangement added");
        self.records.push(arrangement);
        position
    }

    /// Builds an [`Arrangement`] from raw fields and appends it.
    #[allow(clippy::too_many_arguments)]
    pub fn add_new(
        &mut self,
        id: ArrangementId,
        date: DateKey,
        time: TimeKey,
        name: impl Into<String>,
        place: impl Into<String>,
        host: impl Into<String>,
        kind: impl Into<String>,
    ) -> Position {
        self.add(Arrangement::new(id, date, time, name, place, host, kind))
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Owned copy of every record in insertion order.
    pub fn all_cloned(&self) -> Vec<Arrangement> {
        self.records.clone()
    }

    /// Records whose place equals `place` exactly, in insertion order.
    pub fn at_place(&self, place: &str) -> Vec<&Arrangement> {
        self.by_place
            .get(place)
            .into_iter()
            .flat_map(|positions| positions.iter())
            .filter_map(|pos| self.records.get(*pos))
            .collect()
    }

    /// Owned variant of [`Self::at_place`].
    pub fn at_place_cloned(&self, place: &str) -> Vec<Arrangement> {
        self.at_place(place).into_iter().cloned().collect()
    }

    /// Records within the numeric same-date window of `date`, in insertion
    /// order.
    pub fn on_date(&self, date: DateKey) -> Vec<&Arrangement> {
        let (lo, hi) = date_window_bounds(date);
        let positions = self
            .by_date
            .range(lo..=hi)
            .flat_map(|(_, positions)| positions.iter().copied())
            .collect();
        self.in_insertion_order(positions)
    }

    /// Owned variant of [`Self::on_date`].
    pub fn on_date_cloned(&self, date: DateKey) -> Vec<Arrangement> {
        self.on_date(date).into_iter().cloned().collect()
    }

    /// Records inside the date windows of both boundaries and on the side
    /// selected by whichever boundary is later. Boundaries may come in any
    /// order; times only break a date tie between them.
    pub fn between_times(
        &self,
        date1: DateKey,
        time1: TimeKey,
        date2: DateKey,
        time2: TimeKey,
    ) -> Vec<&Arrangement> {
        let span = TimeSpan::new(Moment::new(date1, time1), Moment::new(date2, time2));
        let Some((lo, hi)) = span.candidate_dates() else {
            return Vec::new();
        };

        let positions = self
            .by_date
            .range(lo..=hi)
            .filter(|(date, _)| span.contains(**date))
            .flat_map(|(_, positions)| positions.iter().copied())
            .collect();
        self.in_insertion_order(positions)
    }

    /// Owned variant of [`Self::between_times`].
    pub fn between_times_cloned(
        &self,
        date1: DateKey,
        time1: TimeKey,
        date2: DateKey,
        time2: TimeKey,
    ) -> Vec<Arrangement> {
        self.between_times(date1, time1, date2, time2)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Records with a date in the inclusive range spanned by the two
    /// arguments, sorted by date; equal dates keep insertion order.
    pub fn between_dates(&self, date1: DateKey, date2: DateKey) -> Vec<&Arrangement> {
        let (lo, hi) = (date1.min(date2), date1.max(date2));
        self.by_date
            .range(lo..=hi)
            .flat_map(|(_, positions)| positions.iter())
            .filter_map(|pos| self.records.get(*pos))
            .collect()
    }

    /// Owned variant of [`Self::between_dates`].
    pub fn between_dates_cloned(&self, date1: DateKey, date2: DateKey) -> Vec<Arrangement> {
        self.between_dates(date1, date2).into_iter().cloned().collect()
    }

    /// One leaf of [`Self::grouped_and_sorted`]: the records sharing
    /// `(place, kind)`, sorted by `(date, time)`.
    pub fn group(&self, place: &str, kind: &str) -> Vec<&Arrangement> {
        self.by_group
            .get(&GroupKey::new(place, kind))
            .into_iter()
            .flat_map(|positions| positions.iter())
            .filter_map(|pos| self.records.get(*pos))
            .collect()
    }

    /// Owned variant of [`Self::group`].
    pub fn group_cloned(&self, place: &str, kind: &str) -> Vec<Arrangement> {
        self.group(place, kind).into_iter().cloned().collect()
    }

    /// Every record grouped by place, then type, each leaf sorted ascending
    /// by `(date, time)` and stable for equal keys.
    pub fn grouped_and_sorted(&self) -> GroupedArrangements {
        let mut by_place = GroupedArrangements::new();
        for (key, positions) in &self.by_group {
            let leaf = positions
                .iter()
                .filter_map(|pos| self.records.get(*pos))
                .cloned()
                .collect();
            by_place
                .entry(key.place.clone())
                .or_default()
                .insert(key.kind.clone(), leaf);
        }
        by_place
    }

    fn insert_indices(&mut self, rec: &Arrangement, position: Position) {
        self.by_place
            .entry(rec.place().to_string())
            .or_default()
            .push(position);
        self.by_date.entry(rec.date()).or_default().push(position);

        let records = &self.records;
        let moment = rec.moment();
        let bucket = self.by_group.entry(GroupKey::of(rec)).or_default();
        // `<=` places equal moments after existing ones.
        let at = bucket.partition_point(|pos| records[*pos].moment() <= moment);
        bucket.insert(at, position);
    }

    fn in_insertion_order(&self, mut positions: Vec<Position>) -> Vec<&Arrangement> {
        positions.sort_unstable();
        positions
            .into_iter()
            .filter_map(|pos| self.records.get(pos))
            .collect()
    }
}
