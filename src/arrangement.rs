//! Arrangement record.

use serde::{Deserialize, Serialize};

use crate::{
    query::Moment,
    types::{ArrangementId, DateKey, TimeKey},
};

/// One calendar event. Attributes are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrangement {
    id: ArrangementId,
    date: DateKey,
    time: TimeKey,
    name: String,
    place: String,
    host: String,
    #[serde(rename = "type")]
    kind: String,
}

impl Arrangement {
    /// Builds a record from its raw fields. No validation is performed.
    pub fn new(
        id: ArrangementId,
        date: DateKey,
        time: TimeKey,
        name: impl Into<String>,
        place: impl Into<String>,
        host: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            time,
            name: name.into(),
            place: place.into(),
            host: host.into(),
            kind: kind.into(),
        }
    }

    /// Caller-assigned identifier.
    pub fn id(&self) -> ArrangementId {
        self.id
    }

    /// Raw date key.
    pub fn date(&self) -> DateKey {
        self.date
    }

    /// Raw time-of-day key.
    pub fn time(&self) -> TimeKey {
        self.time
    }

    /// Event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Venue; exact-match key for place queries and grouping.
    pub fn place(&self) -> &str {
        &self.place
    }

    /// Organizer.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Event type (serialized as `"type"`).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// `(date, time)` sort key.
    pub fn moment(&self) -> Moment {
        Moment::new(self.date, self.time)
    }
}
