//! In-memory register and its secondary indices.

/// Index aliases and the composite grouping key.
pub mod indices;
/// Append-only arrangement register.
pub mod store;
