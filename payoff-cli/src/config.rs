use anyhow::{Context, Result};
use payoff_core::{PayoffSimulator, Strategy, DEFAULT_EPSILON, DEFAULT_MAX_MONTHS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_payoff_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub planner: PlannerSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerSection {
    pub strategy: Strategy,
    /// Month cap before a plan is reported as non-convergent
    pub max_months: u32,
    /// Balances at or below this count as paid off
    pub epsilon: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Print JSON instead of the text report
    pub json: bool,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            strategy: Strategy::Avalanche,
            max_months: DEFAULT_MAX_MONTHS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Config {
    /// Simulator from config, with an optional `--max-months` override.
    pub fn simulator(&self, max_months: Option<u32>) -> PayoffSimulator {
        PayoffSimulator::new()
            .with_max_months(max_months.unwrap_or(self.planner.max_months))
            .with_epsilon(self.planner.epsilon)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_payoff_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
