//! Side-by-side avalanche vs snowball comparison

use crate::debt::{Debt, Strategy};
use crate::error::PlanError;
use crate::schedule::PlanResult;
use crate::simulator::PayoffSimulator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub avalanche: PlanResult,
    pub snowball: PlanResult,
}

impl StrategyComparison {
    /// Build from two finished plans
    pub fn new(avalanche: PlanResult, snowball: PlanResult) -> Self {
        Self {
            avalanche,
            snowball,
        }
    }

    /// Interest avalanche saves over snowball (negative if snowball is cheaper)
    pub fn interest_saved(&self) -> f64 {
        self.snowball.total_interest_paid - self.avalanche.total_interest_paid
    }

    /// Snowball months minus avalanche months
    pub fn months_difference(&self) -> i64 {
        self.snowball.total_months as i64 - self.avalanche.total_months as i64
    }

    pub fn plan(&self, strategy: Strategy) -> &PlanResult {
        match strategy {
            Strategy::Avalanche => &self.avalanche,
            Strategy::Snowball => &self.snowball,
        }
    }

    /// Cheaper converged plan; fewer months breaks an interest tie, then avalanche.
    pub fn recommended(&self) -> Option<Strategy> {
        match (self.avalanche.converged, self.snowball.converged) {
            (false, false) => None,
            (true, false) => Some(Strategy::Avalanche),
            (false, true) => Some(Strategy::Snowball),
            (true, true) => {
                let a = &self.avalanche;
                let s = &self.snowball;
                let by_interest = a.total_interest_paid.total_cmp(&s.total_interest_paid);
                let order = if (a.total_interest_paid - s.total_interest_paid).abs() < 0.005 {
                    a.total_months.cmp(&s.total_months)
                } else {
                    by_interest
                };
                if order.is_gt() {
                    Some(Strategy::Snowball)
                } else {
                    Some(Strategy::Avalanche)
                }
            }
        }
    }
}

/// Run both strategies over the same debts and budget.
pub fn compare_strategies(
    simulator: &PayoffSimulator,
    debts: &[Debt],
    monthly_budget: f64,
) -> Result<StrategyComparison, PlanError> {
    let avalanche = simulator.simulate(debts, monthly_budget, Strategy::Avalanche)?;
    let snowball = simulator.simulate(debts, monthly_budget, Strategy::Snowball)?;
    Ok(StrategyComparison::new(avalanche, snowball))
}
