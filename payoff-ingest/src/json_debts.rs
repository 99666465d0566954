//! Parse a JSON debt list: either a bare array or `{ "debts": [...] }`.

use anyhow::{Context, Result};
use payoff_core::Debt;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum DebtFile {
    List(Vec<Debt>),
    Wrapped { debts: Vec<Debt> },
}

pub fn parse_debts_json(s: &str) -> Result<Vec<Debt>> {
    let file: DebtFile = serde_json::from_str(s).context("parse debt list JSON")?;
    Ok(match file {
        DebtFile::List(debts) | DebtFile::Wrapped { debts } => debts,
    })
}
