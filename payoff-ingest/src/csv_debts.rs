//! Parse a CSV debt list into `Debt` records.
//!
//! Expected header (any order, case-insensitive):
//! id,name,principal,apr,minimum_payment
//!
//! `id` may be omitted; rows then get `debt-<n>`. Amounts may carry `$` and
//! thousands separators, APR may carry a trailing `%`.

use anyhow::{bail, Context, Result};
use payoff_core::Debt;
use std::io::Read;
use tracing::debug;

#[derive(Debug)]
struct Columns {
    id: Option<usize>,
    name: usize,
    principal: usize,
    apr: usize,
    minimum_payment: usize,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            header.iter().position(|h| {
                let h = h.trim().to_ascii_lowercase();
                names.iter().any(|n| *n == h)
            })
        };
        let require = |names: &[&str]| {
            find(names).with_context(|| format!("missing column '{}' in header", names[0]))
        };

        Ok(Self {
            id: find(&["id"]),
            name: require(&["name"])?,
            principal: require(&["principal", "balance"])?,
            apr: require(&["apr", "rate"])?,
            minimum_payment: require(&["minimum_payment", "minimumpayment", "minimum"])?,
        })
    }
}

/// Parse debts from any CSV reader (file, stdin, in-memory bytes).
pub fn parse_debts_csv<R: Read>(reader: R) -> Result<Vec<Debt>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = rdr.headers().context("reading CSV header")?.clone();
    let cols = Columns::from_header(&header)?;

    let mut debts = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        // 1-based data row, header is row 0
        let row = i + 1;
        let record = result.with_context(|| format!("reading CSV row {row}"))?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let field = |idx: usize| record.get(idx).unwrap_or("");

        let id = cols
            .id
            .map(field)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("debt-{row}"));

        let name = field(cols.name).to_string();
        if name.is_empty() {
            bail!("row {row}: name is empty");
        }

        debts.push(Debt {
            id,
            name,
            principal: parse_amount(field(cols.principal))
                .with_context(|| format!("row {row}: principal"))?,
            apr: parse_amount(field(cols.apr).trim_end_matches('%'))
                .with_context(|| format!("row {row}: apr"))?,
            minimum_payment: parse_amount(field(cols.minimum_payment))
                .with_context(|| format!("row {row}: minimum_payment"))?,
        });
    }

    debug!(count = debts.len(), "parsed debts from CSV");
    Ok(debts)
}

/// Parse a money-ish number: "$1,234.50" -> 1234.5
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        bail!("empty value");
    }
    cleaned
        .parse::<f64>()
        .with_context(|| format!("not a number: '{raw}'"))
}
