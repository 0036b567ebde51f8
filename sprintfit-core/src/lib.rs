//! sprintfit-core: first-fit sprint capacity scheduling primitives.
//!
//! The scheduler places work items into a fixed horizon of ordered,
//! capacity-bounded slots. It is a pure function of (slots-with-load, items):
//! load state is rebuilt from persisted assignments each session via
//! `aggregate_loads`, and results are plain data the caller persists.

pub mod breakdown;
pub mod item;
pub mod loads;
pub mod scheduler;
pub mod slot;

pub use breakdown::{GeneratedTask, UserStory, breakdown_story, to_work_items};
pub use item::WorkItem;
pub use loads::{AssignedItem, aggregate_loads};
pub use scheduler::{Assignment, HOURS_EPSILON, assign, assign_batch};
pub use slot::{SlotLoad, SlotLoads};
