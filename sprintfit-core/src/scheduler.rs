//! First-fit capacity scheduler.
//!
//! Pure computation: every call receives its own load snapshot and returns
//! plain data; the caller persists the placement. Two sessions scheduling
//! against stale snapshots race last-write-wins in the store — that caveat
//! belongs to the integrator, not to this module.
//!
//! Overflow is a normal outcome, not an error: when no slot has room, the
//! item is forced into the last slot and the result is flagged so callers
//! can reroute it to a backlog state instead.

use crate::item::WorkItem;
use crate::slot::SlotLoads;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Tolerance for capacity comparisons. Fractional hours (1.5, 0.5) are valid,
/// so threshold checks allow this much f64 drift.
pub const HOURS_EPSILON: f64 = 1e-9;

/// Where one work item landed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// 1-based index of the chosen slot.
    pub target_slot_index: usize,

    /// The load the chosen slot would carry after this placement. The caller
    /// persists it; `assign` never mutates its inputs.
    pub new_load_for_slot: f64,

    /// True when no slot had room and the item was forced into the last one.
    pub overflowed: bool,
}

/// Place one item into the earliest slot with remaining capacity.
///
/// Scans slots in ascending index order and picks the first where
/// `current_load + estimated <= capacity` (a slot filled exactly to capacity
/// is accepted). If none qualifies, the last slot takes the item with
/// `overflowed = true`.
pub fn assign(slots: &SlotLoads, item: &WorkItem) -> Result<Assignment> {
    validate_slots(slots)?;
    validate_item(item)?;
    Ok(first_fit(slots, item))
}

/// Place several items as one batch, threading each placement's load into the
/// next decision: once an item lands in a slot, the working copy's load for
/// that slot is updated before the next item is scanned. Without this, two
/// items could both target a slot at the capacity boundary and the second
/// would wrongly appear to fit.
///
/// Contract: NOT commutative. Placements (and which items overflow) depend on
/// item order; callers choosing a different order get a different plan.
///
/// Validates every input up front, so a failure returns no partial results.
pub fn assign_batch(slots: &SlotLoads, items: &[WorkItem]) -> Result<Vec<Assignment>> {
    validate_slots(slots)?;
    for item in items {
        validate_item(item)?;
    }

    let mut working = slots.clone();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let placed = first_fit(&working, item);
        working.set_load(placed.target_slot_index, placed.new_load_for_slot);
        out.push(placed);
    }
    Ok(out)
}

fn validate_slots(slots: &SlotLoads) -> Result<()> {
    if slots.is_empty() {
        bail!("invalid input: slot sequence is empty");
    }
    Ok(())
}

fn validate_item(item: &WorkItem) -> Result<()> {
    if item.estimated_hours <= 0.0 {
        bail!(
            "invalid input: estimated_hours must be > 0 (got {} for '{}')",
            item.estimated_hours,
            item.source_id
        );
    }
    Ok(())
}

// Callers have validated slots non-empty and item hours positive.
fn first_fit(slots: &SlotLoads, item: &WorkItem) -> Assignment {
    for s in slots.iter() {
        if s.current_load_hours + item.estimated_hours <= s.capacity_hours + HOURS_EPSILON {
            return Assignment {
                target_slot_index: s.index,
                new_load_for_slot: s.current_load_hours + item.estimated_hours,
                overflowed: false,
            };
        }
    }

    let last = slots.slots().last().expect("slots validated non-empty");
    Assignment {
        target_slot_index: last.index,
        new_load_for_slot: last.current_load_hours + item.estimated_hours,
        overflowed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SlotLoad;

    fn item(id: &str, hours: f64) -> WorkItem {
        WorkItem::new(id, hours)
    }

    #[test]
    fn picks_earliest_slot_with_room() {
        let loads: SlotLoads = vec![
            SlotLoad::new(1, 6.0).with_load(5.0),
            SlotLoad::new(2, 6.0).with_load(2.0),
            SlotLoad::new(3, 6.0),
        ]
        .into();

        let a = assign(&loads, &item("s1", 3.0)).unwrap();
        assert_eq!(a.target_slot_index, 2);
        assert_eq!(a.new_load_for_slot, 5.0);
        assert!(!a.overflowed);
    }

    #[test]
    fn slot_filled_exactly_to_capacity_is_accepted() {
        let loads: SlotLoads = vec![SlotLoad::new(1, 6.0).with_load(4.5), SlotLoad::new(2, 6.0)].into();

        let a = assign(&loads, &item("s1", 1.5)).unwrap();
        assert_eq!(a.target_slot_index, 1);
        assert_eq!(a.new_load_for_slot, 6.0);
        assert!(!a.overflowed);
    }

    #[test]
    fn fractional_hours_at_the_boundary_respect_epsilon() {
        // 0.1 + 0.2 is not exactly 0.3 in f64; the threshold must still accept
        // a fill that lands on capacity within tolerance.
        let loads: SlotLoads = vec![SlotLoad::new(1, 0.3).with_load(0.1)].into();

        let a = assign(&loads, &item("s1", 0.2)).unwrap();
        assert_eq!(a.target_slot_index, 1);
        assert!(!a.overflowed);
        assert!((a.new_load_for_slot - 0.3).abs() < HOURS_EPSILON);
    }

    #[test]
    fn capacity_respected_whenever_not_overflowed() {
        let loads: SlotLoads = vec![
            SlotLoad::new(1, 6.0).with_load(5.9),
            SlotLoad::new(2, 6.0).with_load(3.0),
        ]
        .into();

        let a = assign(&loads, &item("s1", 2.5)).unwrap();
        assert!(!a.overflowed);
        let cap = loads.get(a.target_slot_index).unwrap().capacity_hours;
        assert!(a.new_load_for_slot <= cap + HOURS_EPSILON);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let loads: SlotLoads = vec![
            SlotLoad::new(1, 6.0).with_load(4.0),
            SlotLoad::new(2, 6.0).with_load(1.0),
        ]
        .into();
        let it = item("s1", 2.0);

        let first = assign(&loads, &it).unwrap();
        for _ in 0..10 {
            assert_eq!(assign(&loads, &it).unwrap(), first);
        }
    }

    #[test]
    fn overflow_falls_back_to_last_slot() {
        let loads: SlotLoads = vec![
            SlotLoad::new(1, 6.0).with_load(6.0),
            SlotLoad::new(2, 6.0).with_load(5.5),
            SlotLoad::new(3, 6.0).with_load(6.0),
        ]
        .into();

        let a = assign(&loads, &item("s1", 1.0)).unwrap();
        assert_eq!(a.target_slot_index, 3);
        assert_eq!(a.new_load_for_slot, 7.0);
        assert!(a.overflowed);
    }

    #[test]
    fn assign_does_not_mutate_input_snapshot() {
        let loads: SlotLoads = vec![SlotLoad::new(1, 6.0)].into();
        let before = loads.clone();
        assign(&loads, &item("s1", 2.0)).unwrap();
        assert_eq!(loads, before);
    }

    #[test]
    fn batch_threads_load_forward() {
        // Three 3h items into one 6h slot: the third cannot fit after the
        // first two fill it to capacity, and overflows in place.
        let loads: SlotLoads = vec![SlotLoad::new(1, 6.0)].into();
        let items = vec![item("a", 3.0), item("b", 3.0), item("c", 3.0)];

        let results = assign_batch(&loads, &items).unwrap();
        assert_eq!(results.len(), 3);

        assert_eq!((results[0].target_slot_index, results[0].new_load_for_slot), (1, 3.0));
        assert!(!results[0].overflowed);
        assert_eq!((results[1].target_slot_index, results[1].new_load_for_slot), (1, 6.0));
        assert!(!results[1].overflowed);
        assert_eq!((results[2].target_slot_index, results[2].new_load_for_slot), (1, 9.0));
        assert!(results[2].overflowed);
    }

    #[test]
    fn asymmetric_two_slot_orders_converge() {
        // slot1 cap 4h, slot2 cap 10h; X:5h never fits slot1, Y:3h does.
        let loads: SlotLoads = vec![SlotLoad::new(1, 4.0), SlotLoad::new(2, 10.0)].into();
        let x = item("x", 5.0);
        let y = item("y", 3.0);

        let xy = assign_batch(&loads, &[x.clone(), y.clone()]).unwrap();
        assert_eq!((xy[0].target_slot_index, xy[0].new_load_for_slot), (2, 5.0));
        assert_eq!((xy[1].target_slot_index, xy[1].new_load_for_slot), (1, 3.0));

        let yx = assign_batch(&loads, &[y, x]).unwrap();
        assert_eq!((yx[0].target_slot_index, yx[0].new_load_for_slot), (1, 3.0));
        assert_eq!((yx[1].target_slot_index, yx[1].new_load_for_slot), (2, 5.0));
    }

    #[test]
    fn batch_order_changes_the_plan() {
        // Same items, same slots, different order: where item "a" lands differs.
        let loads: SlotLoads = vec![
            SlotLoad::new(1, 6.0),
            SlotLoad::new(2, 6.0),
            SlotLoad::new(3, 6.0),
        ]
        .into();
        let a = item("a", 4.0);
        let b = item("b", 3.0);
        let c = item("c", 3.0);

        let abc = assign_batch(&loads, &[a.clone(), b.clone(), c.clone()]).unwrap();
        // a → slot1 (4), b → slot2 (3), c → slot2 (6)
        assert_eq!(abc[0].target_slot_index, 1);
        assert_eq!(abc[1].target_slot_index, 2);
        assert_eq!(abc[2].target_slot_index, 2);

        let bca = assign_batch(&loads, &[b, c, a]).unwrap();
        // b → slot1 (3), c → slot1 (6), a → slot2 (4)
        assert_eq!(bca[0].target_slot_index, 1);
        assert_eq!(bca[1].target_slot_index, 1);
        assert_eq!(bca[2].target_slot_index, 2);

        // Item "a" targets slot1 in one order and slot2 in the other.
        assert_ne!(abc[0].target_slot_index, bca[2].target_slot_index);
    }

    #[test]
    fn empty_slot_sequence_is_invalid_input() {
        let loads = SlotLoads::default();
        let err = assign(&loads, &item("s1", 1.0)).unwrap_err();
        assert!(err.to_string().contains("invalid input"));

        let err = assign_batch(&loads, &[item("s1", 1.0)]).unwrap_err();
        assert!(err.to_string().contains("invalid input"));
    }

    #[test]
    fn non_positive_hours_are_invalid_input() {
        let loads = SlotLoads::uniform(10, 6.0);
        for hours in [0.0, -1.5] {
            let err = assign(&loads, &item("s1", hours)).unwrap_err();
            assert!(err.to_string().contains("invalid input"));
        }
    }

    #[test]
    fn batch_rejects_bad_item_before_placing_anything() {
        let loads = SlotLoads::uniform(2, 6.0);
        let items = vec![item("ok", 2.0), item("bad", 0.0)];
        assert!(assign_batch(&loads, &items).is_err());
    }
}
