//! payoff-ingest: load the user's debt list from JSON or CSV files.

pub mod csv_debts;
pub mod json_debts;

pub use csv_debts::parse_debts_csv;
pub use json_debts::parse_debts_json;

use anyhow::{bail, Context, Result};
use payoff_core::{Debt, InMemoryDebtRepository};
use std::fs;
use std::path::Path;

/// Load debts from a `.json` or `.csv` file, keeping file order.
pub fn load_debts(path: impl AsRef<Path>) -> Result<Vec<Debt>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => {
            let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            parse_debts_json(&s).with_context(|| format!("parsing {}", path.display()))
        }
        Some("csv") => {
            let f = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
            parse_debts_csv(f).with_context(|| format!("parsing {}", path.display()))
        }
        _ => bail!(
            "unsupported debt file: {} (expected .json or .csv)",
            path.display()
        ),
    }
}

/// Load debts straight into a repository.
pub fn load_repository(path: impl AsRef<Path>) -> Result<InMemoryDebtRepository> {
    Ok(load_debts(path)?.into_iter().collect())
}
