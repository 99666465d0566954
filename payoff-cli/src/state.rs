use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$PAYOFF_HOME`, or `~/.payoff`
pub fn payoff_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PAYOFF_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".payoff"))
}

pub fn ensure_payoff_home() -> Result<PathBuf> {
    let dir = payoff_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
