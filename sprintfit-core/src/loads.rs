//! Load aggregation: rebuild per-slot loads from persisted assignments.
//!
//! The scheduler takes its load state as input every session rather than
//! retaining it, so this is the bridge from the persistence collaborator
//! (a list of slot/hours records) to a `SlotLoads` snapshot.

use crate::slot::SlotLoads;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// One persisted work-item-to-slot assignment, as handed to us by the store
/// at the start of a scheduling session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedItem {
    /// 1-based slot index the item was placed in.
    pub slot_index: usize,

    pub estimated_hours: f64,

    /// Originating backlog entry, if the store kept it.
    #[serde(default)]
    pub source_id: String,
}

impl AssignedItem {
    pub fn new(slot_index: usize, estimated_hours: f64, source_id: impl Into<String>) -> Self {
        Self {
            slot_index,
            estimated_hours,
            source_id: source_id.into(),
        }
    }
}

/// Sum `estimated_hours` per slot over the persisted assignments. Slots with
/// no assignments have load 0. Pure per-slot sums, so the input order never
/// matters.
pub fn aggregate_loads(
    slot_count: usize,
    capacity_hours: f64,
    assigned: &[AssignedItem],
) -> Result<SlotLoads> {
    if slot_count == 0 {
        bail!("invalid input: slot_count must be > 0");
    }

    let mut loads = SlotLoads::uniform(slot_count, capacity_hours);
    for a in assigned {
        if a.slot_index < 1 || a.slot_index > slot_count {
            bail!(
                "invalid input: slot_index {} outside 1..={} (item '{}')",
                a.slot_index,
                slot_count,
                a.source_id
            );
        }
        loads.add_load(a.slot_index, a.estimated_hours);
    }
    Ok(loads)
}
