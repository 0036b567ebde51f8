//! Slots: the fixed, ordered time buckets of a planning horizon.
//!
//! A slot is a "day" in the source domain. Its load is always recomputed from
//! persisted assignments at the start of a session (see `loads`), never cached
//! across calls.

use serde::{Deserialize, Serialize};

/// One slot's capacity and current load, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotLoad {
    /// 1-based, ascending. Defines scheduling order.
    pub index: usize,

    pub capacity_hours: f64,

    /// Sum of `estimated_hours` over every item assigned to this slot.
    pub current_load_hours: f64,
}

impl SlotLoad {
    /// An empty slot.
    pub fn new(index: usize, capacity_hours: f64) -> Self {
        Self {
            index,
            capacity_hours,
            current_load_hours: 0.0,
        }
    }

    pub fn with_load(mut self, hours: f64) -> Self {
        self.current_load_hours = hours;
        self
    }
}

/// The ordered load snapshot for a full planning horizon.
///
/// This is an explicit value passed into and returned from scheduling calls;
/// there is no module-level load accumulator anywhere in this crate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlotLoads(Vec<SlotLoad>);

impl SlotLoads {
    /// Fresh horizon: `slot_count` empty slots, indexes 1..=slot_count, all
    /// sharing one capacity.
    pub fn uniform(slot_count: usize, capacity_hours: f64) -> Self {
        Self(
            (1..=slot_count)
                .map(|index| SlotLoad::new(index, capacity_hours))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn slots(&self) -> &[SlotLoad] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotLoad> {
        self.0.iter()
    }

    /// Look up a slot by its 1-based index.
    pub fn get(&self, index: usize) -> Option<&SlotLoad> {
        self.0.iter().find(|s| s.index == index)
    }

    pub(crate) fn set_load(&mut self, index: usize, hours: f64) {
        if let Some(s) = self.0.iter_mut().find(|s| s.index == index) {
            s.current_load_hours = hours;
        }
    }

    pub(crate) fn add_load(&mut self, index: usize, hours: f64) {
        if let Some(s) = self.0.iter_mut().find(|s| s.index == index) {
            s.current_load_hours += hours;
        }
    }
}

impl From<Vec<SlotLoad>> for SlotLoads {
    fn from(slots: Vec<SlotLoad>) -> Self {
        Self(slots)
    }
}
