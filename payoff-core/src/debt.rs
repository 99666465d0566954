//! Debt records and payoff strategies

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A debt the user wants to pay off
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    /// Unique identifier for this debt
    pub id: String,
    /// Human-readable label (card or loan name)
    pub name: String,
    /// Original balance, must be positive
    pub principal: f64,
    /// Annual percentage rate as a percentage (18.99 means 18.99%)
    pub apr: f64,
    /// Monthly floor payment
    #[serde(alias = "minimum_payment")]
    pub minimum_payment: f64,
}

impl Debt {
    /// Create a new Debt
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        principal: f64,
        apr: f64,
        minimum_payment: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            principal,
            apr,
            minimum_payment,
        }
    }

    /// Monthly interest rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        self.apr / 100.0 / 12.0
    }

    /// Interest one month accrues on `balance`
    pub fn monthly_interest(&self, balance: f64) -> f64 {
        balance * self.monthly_rate()
    }

    /// True when the minimum payment alone cannot cover the first month of interest
    pub fn is_negatively_amortizing(&self) -> bool {
        self.minimum_payment <= self.monthly_interest(self.principal)
    }
}

/// Allocation order for budget left over after minimum payments
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Highest APR first
    #[default]
    #[serde(rename = "avalanche")]
    Avalanche,
    /// Smallest balance first
    #[serde(rename = "snowball")]
    Snowball,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Avalanche, Strategy::Snowball];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }

    /// Compare two debts by priority given their current balances.
    /// `Ordering::Less` means `a` receives extra money first.
    pub fn compare(&self, a: (&Debt, f64), b: (&Debt, f64)) -> Ordering {
        match self {
            Strategy::Avalanche => b.0.apr.total_cmp(&a.0.apr),
            Strategy::Snowball => a.1.total_cmp(&b.1),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            other => Err(format!("unknown strategy '{other}' (expected avalanche or snowball)")),
        }
    }
}
