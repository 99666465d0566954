//! Month-by-month debt payoff simulation (avalanche / snowball).
//!
//! Each month interest accrues first, then minimum payments are made in input
//! order, then whatever budget is left goes to debts in strategy order.

use crate::debt::{Debt, Strategy};
use crate::error::PlanError;
use crate::schedule::{OutstandingBalance, PlanResult, ScheduleRow};
use std::collections::HashSet;
use tracing::{debug, warn};

/// 50 years of monthly payments
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// Balances at or below this are treated as paid off
pub const DEFAULT_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffSimulator {
    /// Hard cap on simulated months
    pub max_months: u32,
    /// Zero tolerance for balances, in currency units
    pub epsilon: f64,
}

impl Default for PayoffSimulator {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Working balance of one debt during a simulation
#[derive(Debug)]
struct DebtState<'a> {
    debt: &'a Debt,
    balance: f64,
    interest_this_month: f64,
}

impl PayoffSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Simulate paying off `debts` with a fixed `monthly_budget`.
    ///
    /// Invalid input is rejected before any month is simulated. Hitting the
    /// month cap is not an error: the partial schedule comes back with
    /// `converged == false` (see [`PlanResult::into_converged`]).
    pub fn simulate(
        &self,
        debts: &[Debt],
        monthly_budget: f64,
        strategy: Strategy,
    ) -> Result<PlanResult, PlanError> {
        self.validate(debts, monthly_budget)?;

        debug!(
            debts = debts.len(),
            %strategy,
            monthly_budget,
            max_months = self.max_months,
            "simulating payoff"
        );
        for d in debts.iter().filter(|d| d.is_negatively_amortizing()) {
            debug!(debt = %d.id, apr = d.apr, "minimum payment does not cover monthly interest");
        }

        let mut states: Vec<DebtState> = debts
            .iter()
            .map(|debt| DebtState {
                debt,
                balance: debt.principal,
                interest_this_month: 0.0,
            })
            .collect();

        let mut schedule: Vec<ScheduleRow> = Vec::new();
        let mut month = 0u32;

        while month < self.max_months && !self.all_paid(&states) {
            month += 1;
            let row = self.simulate_month(month, &mut states, monthly_budget, strategy);
            schedule.push(row);
        }

        let outstanding: Vec<OutstandingBalance> = states
            .iter()
            .filter(|s| s.balance > self.epsilon)
            .map(|s| OutstandingBalance {
                debt_id: s.debt.id.clone(),
                balance: s.balance,
            })
            .collect();
        let converged = outstanding.is_empty();
        let total_interest_paid: f64 = schedule.iter().map(|r| r.interest_accrued).sum();

        if converged {
            debug!(months = month, total_interest_paid, "payoff plan converged");
        } else {
            warn!(
                months = month,
                outstanding = outstanding.iter().map(|o| o.balance).sum::<f64>(),
                "payoff plan hit the month cap with balances remaining"
            );
        }

        Ok(PlanResult {
            strategy,
            monthly_budget,
            total_months: schedule.len() as u32,
            total_interest_paid,
            converged,
            outstanding,
            schedule,
        })
    }

    fn simulate_month(
        &self,
        month: u32,
        states: &mut [DebtState],
        monthly_budget: f64,
        strategy: Strategy,
    ) -> ScheduleRow {
        let eps = self.epsilon;
        let mut row = ScheduleRow::new(month);
        let mut remaining = monthly_budget;

        // Accrual
        for s in states.iter_mut() {
            s.interest_this_month = 0.0;
            if s.balance > eps {
                let interest = s.debt.monthly_interest(s.balance);
                s.balance += interest;
                s.interest_this_month = interest;
                row.interest_accrued += interest;
            }
        }

        // Minimums, input order
        for s in states.iter_mut() {
            if s.balance <= eps {
                continue;
            }
            let pay_min = s.balance.min(s.debt.minimum_payment);
            let applied = pay_min.min(remaining);
            if applied <= 0.0 {
                continue;
            }
            s.balance -= applied;
            remaining -= applied;
            row.apply_minimum(&s.debt.id, applied);
            row.principal_paid += (applied - s.interest_this_month).max(0.0);
        }

        // Extra, strategy order
        if remaining > 0.0 {
            let mut order: Vec<usize> = (0..states.len())
                .filter(|&i| states[i].balance > eps)
                .collect();
            // sort_by is stable, so ties keep input order
            order.sort_by(|&a, &b| {
                strategy.compare(
                    (states[a].debt, states[a].balance),
                    (states[b].debt, states[b].balance),
                )
            });

            for i in order {
                if remaining <= 0.0 {
                    break;
                }
                let s = &mut states[i];
                let extra = s.balance.min(remaining);
                s.balance -= extra;
                remaining -= extra;
                row.apply_extra(&s.debt.id, extra);
                row.principal_paid += extra;
            }
        }

        for s in states.iter_mut() {
            s.balance = s.balance.max(0.0);
        }
        row.remaining_balance = states.iter().map(|s| s.balance).sum();
        row
    }

    fn all_paid(&self, states: &[DebtState]) -> bool {
        states.iter().all(|s| s.balance <= self.epsilon)
    }

    fn validate(&self, debts: &[Debt], monthly_budget: f64) -> Result<(), PlanError> {
        if self.max_months == 0 {
            return Err(PlanError::invalid("max_months must be at least 1"));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(PlanError::invalid(format!(
                "epsilon must be a positive number, got {}",
                self.epsilon
            )));
        }
        if debts.is_empty() {
            return Err(PlanError::invalid("debt list is empty"));
        }
        if !monthly_budget.is_finite() || monthly_budget < 0.0 {
            return Err(PlanError::invalid(format!(
                "monthly budget must be a non-negative number, got {monthly_budget}"
            )));
        }

        let mut seen = HashSet::new();
        for d in debts {
            if !seen.insert(d.id.as_str()) {
                return Err(PlanError::invalid(format!("duplicate debt id '{}'", d.id)));
            }
            if !d.principal.is_finite() || d.principal <= 0.0 {
                return Err(PlanError::invalid(format!(
                    "debt '{}': principal must be positive, got {}",
                    d.id, d.principal
                )));
            }
            if !d.apr.is_finite() || d.apr < 0.0 {
                return Err(PlanError::invalid(format!(
                    "debt '{}': apr must be non-negative, got {}",
                    d.id, d.apr
                )));
            }
            if !d.minimum_payment.is_finite() || d.minimum_payment < 0.0 {
                return Err(PlanError::invalid(format!(
                    "debt '{}': minimum payment must be non-negative, got {}",
                    d.id, d.minimum_payment
                )));
            }
        }
        Ok(())
    }
}

/// Simulate with the default month cap and zero tolerance.
pub fn simulate(
    debts: &[Debt],
    monthly_budget: f64,
    strategy: Strategy,
) -> Result<PlanResult, PlanError> {
    PayoffSimulator::default().simulate(debts, monthly_budget, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_zero_apr_pays_off_in_twelve_months() {
        let debts = vec![Debt::new("d1", "Laptop", 1200.0, 0.0, 100.0)];
        let plan = simulate(&debts, 100.0, Strategy::Avalanche).unwrap();

        assert!(plan.converged);
        assert_eq!(plan.total_months, 12);
        assert_eq!(plan.total_interest_paid, 0.0);
        assert!(plan.schedule.iter().all(|r| r.payments[0].minimum_applied == 100.0));
    }

    #[test]
    fn test_interest_accrues_before_payment() {
        let debts = vec![Debt::new("d1", "Card", 1000.0, 24.0, 1000.0)];
        let plan = simulate(&debts, 1000.0, Strategy::Avalanche).unwrap();

        assert!(plan.converged);
        assert_eq!(plan.total_months, 2);

        let m1 = &plan.schedule[0];
        assert!(approx(m1.interest_accrued, 20.0));
        assert!(approx(m1.payments[0].minimum_applied, 1000.0));
        assert!(approx(m1.payments[0].extra_applied, 0.0));
        assert!(approx(m1.principal_paid, 980.0));
        assert!(approx(m1.remaining_balance, 20.0));

        let m2 = &plan.schedule[1];
        assert!(approx(m2.interest_accrued, 0.4));
        assert!(approx(m2.payments[0].minimum_applied, 20.4));
        assert!(approx(m2.principal_paid, 20.0));

        assert!(approx(plan.total_interest_paid, 20.4));
    }

    #[test]
    fn test_extra_merged_into_minimum_entry() {
        let debts = vec![
            Debt::new("a", "Card A", 500.0, 20.0, 25.0),
            Debt::new("b", "Card B", 500.0, 10.0, 25.0),
        ];
        let plan = simulate(&debts, 200.0, Strategy::Avalanche).unwrap();
        let m1 = &plan.schedule[0];

        assert_eq!(m1.payments.len(), 2);
        let a = m1.payment_for("a").unwrap();
        let b = m1.payment_for("b").unwrap();
        assert!(approx(a.minimum_applied, 25.0));
        assert!(approx(a.extra_applied, 150.0));
        assert!(approx(b.minimum_applied, 25.0));
        assert!(approx(b.extra_applied, 0.0));
        assert!(approx(m1.total_paid(), 200.0));
    }

    #[test]
    fn test_extra_creates_entry_without_minimum() {
        // B has no minimum, so its only payment is extra
        let debts = vec![
            Debt::new("a", "Card A", 1000.0, 5.0, 50.0),
            Debt::new("b", "Card B", 100.0, 30.0, 0.0),
        ];
        let plan = simulate(&debts, 80.0, Strategy::Avalanche).unwrap();
        let m1 = &plan.schedule[0];
        let b = m1.payment_for("b").unwrap();
        assert_eq!(b.minimum_applied, 0.0);
        assert!(approx(b.extra_applied, 30.0));
    }

    #[test]
    fn test_budget_below_minimums_is_spent_in_input_order() {
        let debts = vec![
            Debt::new("a", "First", 1000.0, 0.0, 60.0),
            Debt::new("b", "Second", 1000.0, 0.0, 60.0),
        ];
        let plan = simulate(&debts, 100.0, Strategy::Snowball).unwrap();
        let m1 = &plan.schedule[0];
        assert!(approx(m1.payment_for("a").unwrap().minimum_applied, 60.0));
        assert!(approx(m1.payment_for("b").unwrap().minimum_applied, 40.0));
    }

    #[test]
    fn test_zero_budget_hits_cap() {
        let debts = vec![Debt::new("d1", "Card", 500.0, 0.0, 50.0)];
        let sim = PayoffSimulator::new().with_max_months(24);
        let plan = sim.simulate(&debts, 0.0, Strategy::Avalanche).unwrap();

        assert!(!plan.converged);
        assert_eq!(plan.total_months, 24);
        assert_eq!(plan.outstanding.len(), 1);
        assert!(approx(plan.outstanding_total(), 500.0));
        assert!(plan.schedule.iter().all(|r| r.payments.is_empty()));
    }

    #[test]
    fn test_budget_below_interest_never_converges() {
        // 2% a month on 10k is 200; budget of 150 cannot keep up
        let debts = vec![Debt::new("d1", "Card", 10_000.0, 24.0, 150.0)];
        let plan = simulate(&debts, 150.0, Strategy::Avalanche).unwrap();

        assert!(!plan.converged);
        assert_eq!(plan.total_months, DEFAULT_MAX_MONTHS);
        assert!(plan.clone().into_converged().is_err());
        // Principal grows instead of shrinking
        assert!(plan.outstanding_total() > 10_000.0);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let ok = Debt::new("d1", "Card", 100.0, 10.0, 10.0);

        assert!(matches!(
            simulate(&[], 100.0, Strategy::Avalanche),
            Err(PlanError::InvalidInput { .. })
        ));
        assert!(simulate(&[ok.clone()], -1.0, Strategy::Avalanche).is_err());
        assert!(simulate(&[ok.clone()], f64::NAN, Strategy::Avalanche).is_err());

        let mut neg_apr = ok.clone();
        neg_apr.apr = -1.0;
        assert!(simulate(&[neg_apr], 100.0, Strategy::Avalanche).is_err());

        let mut neg_min = ok.clone();
        neg_min.minimum_payment = -5.0;
        assert!(simulate(&[neg_min], 100.0, Strategy::Avalanche).is_err());

        let mut zero_principal = ok.clone();
        zero_principal.principal = 0.0;
        assert!(simulate(&[zero_principal], 100.0, Strategy::Avalanche).is_err());

        let dup = vec![ok.clone(), ok.clone()];
        let err = simulate(&dup, 100.0, Strategy::Avalanche).unwrap_err();
        assert!(err.to_string().contains("duplicate debt id"));

        let sim = PayoffSimulator::new().with_max_months(0);
        assert!(sim.simulate(&[ok.clone()], 100.0, Strategy::Avalanche).is_err());

        let sim = PayoffSimulator::new().with_epsilon(0.0);
        assert!(sim.simulate(&[ok], 100.0, Strategy::Avalanche).is_err());
    }

    #[test]
    fn test_inputs_not_mutated() {
        let debts = vec![Debt::new("d1", "Card", 300.0, 12.0, 50.0)];
        let before = debts.clone();
        simulate(&debts, 100.0, Strategy::Snowball).unwrap();
        assert_eq!(debts, before);
    }
}
