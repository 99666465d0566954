//! Plain-text rendering of plans and comparisons

use chrono::NaiveDate;
use payoff_core::{Debt, PlanResult, Strategy, StrategyComparison};
use std::fmt::Write;

pub fn render_plan(plan: &PlanResult, debts: &[Debt], start: Option<NaiveDate>) -> String {
    let mut s = String::new();

    let _ = writeln!(
        s,
        "# Payoff plan ({}, ${:.2}/month)\n",
        plan.strategy, plan.monthly_budget
    );

    if plan.converged {
        let _ = writeln!(s, "Debt free in {} months", plan.total_months);
        if let Some(date) = start.and_then(|d| plan.payoff_date(d)) {
            let _ = writeln!(s, "Final payment: {}", date.format("%B %Y"));
        }
    } else {
        let _ = writeln!(
            s,
            "NOT PAID OFF after {} months: ${:.2} still owed",
            plan.total_months,
            plan.outstanding_total()
        );
    }
    let _ = writeln!(s, "Total interest: ${:.2}", plan.total_interest_paid);
    let _ = writeln!(s, "Total paid:     ${:.2}\n", plan.total_paid());

    let _ = writeln!(s, "## Debts\n");
    for d in plan.debt_summaries(debts) {
        let when = match d.payoff_month {
            Some(m) => format!("paid off month {m}"),
            None => "still owed".to_string(),
        };
        let _ = writeln!(s, "- {} | paid ${:.2} | {}", d.name, d.total_paid, when);
    }

    let _ = writeln!(s, "\n## Schedule\n");
    let _ = writeln!(
        s,
        "{:>5}  {:>10}  {:>10}  {:>12}",
        "month", "interest", "principal", "remaining"
    );
    for row in &plan.schedule {
        let _ = writeln!(
            s,
            "{:>5}  {:>10.2}  {:>10.2}  {:>12.2}",
            row.month, row.interest_accrued, row.principal_paid, row.remaining_balance
        );
    }
    s
}

pub fn render_comparison(cmp: &StrategyComparison) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "# Avalanche vs snowball\n");

    for strategy in Strategy::ALL {
        let plan = cmp.plan(strategy);
        let months = if plan.converged {
            format!("{} months", plan.total_months)
        } else {
            format!("not paid off in {} months", plan.total_months)
        };
        let _ = writeln!(
            s,
            "- {:<9} | {} | interest ${:.2}",
            strategy, months, plan.total_interest_paid
        );
    }

    let _ = writeln!(
        s,
        "\nAvalanche saves ${:.2} in interest and {} months",
        cmp.interest_saved(),
        cmp.months_difference()
    );
    match cmp.recommended() {
        Some(strategy) => {
            let _ = writeln!(s, "Recommended: {strategy}");
        }
        None => {
            let _ = writeln!(s, "Neither strategy pays the debts off; raise the monthly budget.");
        }
    }
    s
}
