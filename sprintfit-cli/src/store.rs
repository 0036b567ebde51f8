//! File-backed assignment store: the persistence collaborator stand-in.
//!
//! Two formats, picked by extension: a JSON array of `AssignedItem` records,
//! or CSV with `slot_index,estimated_hours,source_id` headers. A missing file
//! is an empty store.
//!
//! Writes are whole-file rewrites: concurrent sessions race last-write-wins,
//! same as the document store the source system used.

use anyhow::{Context, Result, bail};
use sprintfit_core::AssignedItem;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Csv,
}

fn format_for(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("csv") => Ok(Format::Csv),
        _ => bail!(
            "unsupported store format: {} (expected .json or .csv)",
            path.display()
        ),
    }
}

pub fn load_assignments(path: &Path) -> Result<Vec<AssignedItem>> {
    let fmt = format_for(path)?;
    if !path.exists() {
        return Ok(vec![]);
    }

    match fmt {
        Format::Json => {
            let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
        }
        Format::Csv => {
            let mut rdr =
                csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
            let mut out = Vec::new();
            for rec in rdr.deserialize() {
                let item: AssignedItem =
                    rec.with_context(|| format!("parse {}", path.display()))?;
                out.push(item);
            }
            Ok(out)
        }
    }
}

/// Append new assignments and rewrite the store.
pub fn append_assignments(path: &Path, new: &[AssignedItem]) -> Result<()> {
    let fmt = format_for(path)?;
    let mut all = load_assignments(path)?;
    all.extend_from_slice(new);

    match fmt {
        Format::Json => {
            let s = serde_json::to_string_pretty(&all).context("serialize assignments")?;
            fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        }
        Format::Csv => {
            let mut wtr =
                csv::Writer::from_path(path).with_context(|| format!("write {}", path.display()))?;
            for item in &all {
                wtr.serialize(item)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}
