use anyhow::Result;
use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand};
use sprintfit_core::{
    AssignedItem, Assignment, SlotLoads, UserStory, WorkItem, aggregate_loads, assign,
    assign_batch, breakdown_story, to_work_items,
};
use std::path::{Path, PathBuf};

mod config;
mod store;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "sprintfit", version, about = "First-fit sprint capacity planner")]
struct Cli {
    /// Config TOML (default: ./sprintfit.toml; built-in defaults if absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Assignment store, JSON or CSV by extension
    #[arg(long, global = true, default_value = "assignments.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print per-day load vs capacity for the current store
    Loads,

    /// Schedule one ad-hoc item into the earliest day with room
    Plan {
        /// Estimated effort in hours (fractions allowed)
        #[arg(long)]
        hours: f64,

        /// Backlog entry the item traces back to
        #[arg(long, default_value = "adhoc")]
        source_id: String,

        /// Persist the placement back to the store (last write wins)
        #[arg(long)]
        write: bool,
    },

    /// Break a user story into tasks and schedule them as one batch
    Breakdown {
        #[arg(long)]
        id: String,

        /// "As a ..."
        #[arg(long)]
        role: String,

        /// "I want to ..."
        #[arg(long)]
        action: String,

        /// "So that ..."
        #[arg(long)]
        benefit: String,

        /// Persist the placements back to the store (last write wins)
        #[arg(long)]
        write: bool,
    },

    /// Write a default sprintfit.toml
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Init => config::init_config(cli.config.as_deref())?,
        Command::Loads => cmd_loads(&cfg, &cli.store)?,
        Command::Plan {
            hours,
            source_id,
            write,
        } => cmd_plan(&cfg, &cli.store, hours, source_id, write)?,
        Command::Breakdown {
            id,
            role,
            action,
            benefit,
            write,
        } => cmd_breakdown(&cfg, &cli.store, UserStory::new(id, role, action, benefit), write)?,
    }

    Ok(())
}

/// Fresh load snapshot for this session, straight from the store.
fn current_loads(cfg: &Config, store_path: &Path) -> Result<SlotLoads> {
    let assigned = store::load_assignments(store_path)?;
    aggregate_loads(cfg.plan.slot_count, cfg.plan.capacity_hours, &assigned)
}

fn slot_date(start: NaiveDate, index: usize) -> NaiveDate {
    start + Duration::days(index as i64 - 1)
}

fn cmd_loads(cfg: &Config, store_path: &Path) -> Result<()> {
    let loads = current_loads(cfg, store_path)?;

    println!("Day  Date        Load / Capacity");
    for s in loads.iter() {
        let over = if s.current_load_hours > s.capacity_hours {
            "  OVER"
        } else {
            ""
        };
        println!(
            "{:>3}  {}  {:>4.1}h / {:.1}h{}",
            s.index,
            slot_date(cfg.plan.start_date, s.index),
            s.current_load_hours,
            s.capacity_hours,
            over
        );
    }
    Ok(())
}

fn print_placement(cfg: &Config, label: &str, a: &Assignment) {
    println!(
        "{} -> day {} ({}), load {:.1}h{}",
        label,
        a.target_slot_index,
        slot_date(cfg.plan.start_date, a.target_slot_index),
        a.new_load_for_slot,
        if a.overflowed {
            "  [overflow: no day had room, forced into the last day]"
        } else {
            ""
        }
    );
}

fn cmd_plan(
    cfg: &Config,
    store_path: &Path,
    hours: f64,
    source_id: String,
    write: bool,
) -> Result<()> {
    let loads = current_loads(cfg, store_path)?;
    let item = WorkItem::new(source_id.clone(), hours);
    let placed = assign(&loads, &item)?;

    print_placement(cfg, &format!("{:.1}h '{}'", hours, source_id), &placed);

    if write {
        store::append_assignments(
            store_path,
            &[AssignedItem::new(placed.target_slot_index, hours, source_id)],
        )?;
        println!("Persisted to {}", store_path.display());
    }
    Ok(())
}

fn cmd_breakdown(cfg: &Config, store_path: &Path, story: UserStory, write: bool) -> Result<()> {
    let loads = current_loads(cfg, store_path)?;

    let tasks = breakdown_story(&story);
    let items = to_work_items(&story, &tasks);
    let results = assign_batch(&loads, &items)?;

    println!("Story '{}' -> {} tasks\n", story.id, tasks.len());
    for (t, a) in tasks.iter().zip(&results) {
        print_placement(cfg, &format!("{:.1}h [{}] {}", t.hours, t.role, t.description), a);
    }

    let overflowed = results.iter().filter(|a| a.overflowed).count();
    if overflowed > 0 {
        println!("\nWarning: {} task(s) exceed the horizon capacity.", overflowed);
    }

    if write {
        let records: Vec<AssignedItem> = results
            .iter()
            .zip(&items)
            .map(|(a, item)| {
                AssignedItem::new(a.target_slot_index, item.estimated_hours, story.id.clone())
            })
            .collect();
        store::append_assignments(store_path, &records)?;
        println!("Persisted {} assignments to {}", records.len(), store_path.display());
    }
    Ok(())
}
