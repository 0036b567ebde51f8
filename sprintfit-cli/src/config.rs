use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "sprintfit.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub plan: PlanSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSection {
    /// Number of slots ("days") in the planning horizon.
    pub slot_count: usize,

    /// Hours each slot can absorb before the scheduler moves on.
    pub capacity_hours: f64,

    /// Calendar date of slot 1; each later slot advances one day.
    pub start_date: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plan: PlanSection {
                // The observed system: a 10-day horizon at 6h/day.
                slot_count: 10,
                capacity_hours: 6.0,
                start_date: chrono::Local::now().date_naive(),
            },
        }
    }
}

fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = config_path(explicit);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = config_path(explicit);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    let s = toml::to_string_pretty(&cfg).context("serialize config")?;
    fs::write(&p, &s).with_context(|| format!("write {}", p.display()))?;
    println!("Wrote {}", p.display());
    Ok(())
}
