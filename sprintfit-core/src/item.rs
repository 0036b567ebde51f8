//! Work item model for the sprint capacity scheduler.

use serde::{Deserialize, Serialize};

/// A unit of work to be placed into a slot.
///
/// Note: we keep this small + serializable. Storage (files, document stores)
/// is the caller's layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Opaque id of the backlog entry this item came from. Traceability only;
    /// the scheduler never reads it.
    pub source_id: String,

    /// Hours. Must be > 0; enforced at the scheduler boundary.
    pub estimated_hours: f64,
}

impl WorkItem {
    pub fn new(source_id: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            source_id: source_id.into(),
            estimated_hours,
        }
    }
}
