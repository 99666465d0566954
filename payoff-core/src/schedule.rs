//! Amortization schedule types produced by the simulator

use crate::debt::{Debt, Strategy};
use crate::error::PlanError;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Money applied to one debt in one month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub debt_id: String,
    pub minimum_applied: f64,
    pub extra_applied: f64,
}

impl Payment {
    pub fn total(&self) -> f64 {
        self.minimum_applied + self.extra_applied
    }
}

/// One simulated month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    /// 1-indexed month number
    pub month: u32,
    /// At most one entry per debt
    pub payments: Vec<Payment>,
    pub interest_accrued: f64,
    /// Approximate: minimum payments only count the part above this month's interest
    pub principal_paid: f64,
    /// Sum of all balances after this month's payments
    pub remaining_balance: f64,
}

impl ScheduleRow {
    pub fn new(month: u32) -> Self {
        Self {
            month,
            ..Self::default()
        }
    }

    pub fn payment_for(&self, debt_id: &str) -> Option<&Payment> {
        self.payments.iter().find(|p| p.debt_id == debt_id)
    }

    /// Total cash paid out this month
    pub fn total_paid(&self) -> f64 {
        self.payments.iter().map(Payment::total).sum()
    }

    /// Add a minimum payment, merging into an existing entry for the same debt
    pub(crate) fn apply_minimum(&mut self, debt_id: &str, amount: f64) {
        self.entry(debt_id).minimum_applied += amount;
    }

    /// Add an extra payment, merging into an existing entry for the same debt
    pub(crate) fn apply_extra(&mut self, debt_id: &str, amount: f64) {
        self.entry(debt_id).extra_applied += amount;
    }

    fn entry(&mut self, debt_id: &str) -> &mut Payment {
        let idx = match self.payments.iter().position(|p| p.debt_id == debt_id) {
            Some(i) => i,
            None => {
                self.payments.push(Payment {
                    debt_id: debt_id.to_string(),
                    minimum_applied: 0.0,
                    extra_applied: 0.0,
                });
                self.payments.len() - 1
            }
        };
        &mut self.payments[idx]
    }
}

/// Balance left on a debt when the simulation stopped
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingBalance {
    pub debt_id: String,
    pub balance: f64,
}

/// Full result of a payoff simulation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    pub strategy: Strategy,
    pub monthly_budget: f64,
    pub total_months: u32,
    pub total_interest_paid: f64,
    /// False when the month cap was hit with money still owed
    pub converged: bool,
    /// Debts above the zero tolerance at the end; empty when converged
    pub outstanding: Vec<OutstandingBalance>,
    pub schedule: Vec<ScheduleRow>,
}

/// Per-debt rollup of a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtSummary {
    pub debt_id: String,
    pub name: String,
    pub total_paid: f64,
    /// None when the debt is still owed at the end of the schedule
    pub payoff_month: Option<u32>,
}

impl PlanResult {
    /// Sum of everything still owed
    pub fn outstanding_total(&self) -> f64 {
        self.outstanding.iter().map(|o| o.balance).sum()
    }

    /// Turn a non-convergent plan into an error for callers that need a finished payoff
    pub fn into_converged(self) -> Result<Self, PlanError> {
        if self.converged {
            Ok(self)
        } else {
            Err(PlanError::NonConvergent {
                months: self.total_months,
                outstanding: self.outstanding_total(),
            })
        }
    }

    /// Month of the last payment on `debt_id`, or 0 if it never needed one.
    pub fn payoff_month(&self, debt_id: &str) -> Option<u32> {
        if self.outstanding.iter().any(|o| o.debt_id == debt_id) {
            return None;
        }
        let last = self
            .schedule
            .iter()
            .rev()
            .find(|row| row.payment_for(debt_id).is_some())
            .map(|row| row.month);
        Some(last.unwrap_or(0))
    }

    /// Total paid per debt, in the order of `debts`
    pub fn debt_summaries(&self, debts: &[Debt]) -> Vec<DebtSummary> {
        debts
            .iter()
            .map(|d| {
                let total_paid = self
                    .schedule
                    .iter()
                    .filter_map(|row| row.payment_for(&d.id))
                    .map(Payment::total)
                    .sum();
                DebtSummary {
                    debt_id: d.id.clone(),
                    name: d.name.clone(),
                    total_paid,
                    payoff_month: self.payoff_month(&d.id),
                }
            })
            .collect()
    }

    /// Total cash paid over the whole schedule
    pub fn total_paid(&self) -> f64 {
        self.schedule.iter().map(ScheduleRow::total_paid).sum()
    }

    /// Calendar month of the final payment when month 1 falls on `start`.
    pub fn payoff_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        if !self.converged {
            return None;
        }
        start.checked_add_months(Months::new(self.total_months.saturating_sub(1)))
    }
}
