//! Runtime event stream payloads.

use crate::types::{ArrangementId, Position};

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterEvent {
    /// An arrangement was appended.
    Added {
        /// Caller-assigned id of the record.
        id: ArrangementId,
        /// Insertion position inside the register.
        position: Position,
    },
}
