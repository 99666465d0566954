use payoff_core::{
    compare_strategies, simulate, Debt, DebtRepository, InMemoryDebtRepository, PayoffSimulator,
    Strategy,
};

const EPS: f64 = 0.01;

fn household_debts() -> Vec<Debt> {
    vec![
        Debt::new("cc", "Credit card", 4000.0, 24.99, 100.0),
        Debt::new("store", "Store card", 600.0, 12.0, 25.0),
        Debt::new("car", "Car loan", 8000.0, 6.5, 200.0),
    ]
}

#[test]
fn test_balances_never_negative_and_total_decreases() {
    for strategy in Strategy::ALL {
        let plan = simulate(&household_debts(), 700.0, strategy).unwrap();
        assert!(plan.converged);

        let mut prev = f64::INFINITY;
        for row in &plan.schedule {
            assert!(row.remaining_balance >= -EPS, "month {} went negative", row.month);
            assert!(row.remaining_balance < prev, "month {} did not shrink", row.month);
            for p in &row.payments {
                assert!(p.minimum_applied >= 0.0 && p.extra_applied >= 0.0);
            }
            prev = row.remaining_balance;
        }
        assert!(plan.schedule.last().unwrap().remaining_balance <= EPS);
    }
}

#[test]
fn test_converges_when_minimums_cover_interest() {
    let debts = household_debts();
    let minimums: f64 = debts.iter().map(|d| d.minimum_payment).sum();
    let plan = simulate(&debts, minimums, Strategy::Avalanche).unwrap();

    assert!(plan.converged);
    assert!(plan.total_months < 600);
    assert!(plan.outstanding.is_empty());
}

#[test]
fn test_avalanche_targets_higher_apr_first() {
    let debts = vec![
        Debt::new("low", "Low APR", 1000.0, 10.0, 20.0),
        Debt::new("high", "High APR", 1000.0, 20.0, 20.0),
    ];
    let plan = simulate(&debts, 200.0, Strategy::Avalanche).unwrap();
    let m1 = &plan.schedule[0];

    assert!(m1.payment_for("high").unwrap().extra_applied > 0.0);
    assert_eq!(m1.payment_for("low").unwrap().extra_applied, 0.0);
    assert!(plan.payoff_month("high").unwrap() < plan.payoff_month("low").unwrap());
}

#[test]
fn test_snowball_targets_smaller_balance_first() {
    let debts = vec![
        Debt::new("big", "Big", 2000.0, 15.0, 40.0),
        Debt::new("small", "Small", 500.0, 15.0, 40.0),
    ];
    let plan = simulate(&debts, 200.0, Strategy::Snowball).unwrap();
    let m1 = &plan.schedule[0];

    assert!(m1.payment_for("small").unwrap().extra_applied > 0.0);
    assert_eq!(m1.payment_for("big").unwrap().extra_applied, 0.0);
    assert!(plan.payoff_month("small").unwrap() < plan.payoff_month("big").unwrap());
}

#[test]
fn test_lower_budget_never_costs_less_interest() {
    for strategy in Strategy::ALL {
        let budgets = [2000.0, 1200.0, 800.0, 600.0, 450.0, 350.0];
        let mut prev = 0.0;
        for budget in budgets {
            let plan = simulate(&household_debts(), budget, strategy).unwrap();
            assert!(plan.converged, "{strategy} did not converge at {budget}");
            assert!(
                plan.total_interest_paid + 1e-9 >= prev,
                "{strategy}: budget {budget} paid {} < {prev}",
                plan.total_interest_paid
            );
            prev = plan.total_interest_paid;
        }
    }
}

#[test]
fn test_zero_apr_scenario() {
    let debts = vec![Debt::new("d1", "Laptop", 1200.0, 0.0, 100.0)];
    let plan = simulate(&debts, 100.0, Strategy::Snowball).unwrap();
    assert_eq!(plan.total_months, 12);
    assert_eq!(plan.total_interest_paid, 0.0);
}

#[test]
fn test_accrual_before_payment_scenario() {
    let debts = vec![Debt::new("d1", "Card", 1000.0, 24.0, 1000.0)];
    let plan = simulate(&debts, 1000.0, Strategy::Avalanche).unwrap();

    // 1000 + 20 interest, pay 1000, 20 left; then 0.40 interest and paid off
    assert_eq!(plan.total_months, 2);
    assert!((plan.total_interest_paid - 20.4).abs() < 1e-6);
    assert!((plan.schedule[0].remaining_balance - 20.0).abs() < 1e-6);
}

#[test]
fn test_degenerate_tie_gives_identical_plans() {
    let debts = vec![
        Debt::new("a", "Card A", 1500.0, 18.0, 45.0),
        Debt::new("b", "Card B", 1500.0, 18.0, 45.0),
    ];
    let cmp = compare_strategies(&PayoffSimulator::new(), &debts, 250.0).unwrap();

    assert_eq!(cmp.avalanche.schedule, cmp.snowball.schedule);
    assert_eq!(cmp.avalanche.total_months, cmp.snowball.total_months);
    assert_eq!(cmp.avalanche.total_interest_paid, cmp.snowball.total_interest_paid);
}

#[test]
fn test_deterministic() {
    let a = simulate(&household_debts(), 500.0, Strategy::Avalanche).unwrap();
    let b = simulate(&household_debts(), 500.0, Strategy::Avalanche).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_payment_entries_unique_per_month() {
    let plan = simulate(&household_debts(), 900.0, Strategy::Snowball).unwrap();
    for row in &plan.schedule {
        let mut ids: Vec<&str> = row.payments.iter().map(|p| p.debt_id.as_str()).collect();
        let n = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), n, "duplicate payment entry in month {}", row.month);
    }
}

#[test]
fn test_plan_from_repository() {
    let mut repo: InMemoryDebtRepository = household_debts().into_iter().collect();
    repo.remove("car");

    let plan = simulate(&repo.list(), 500.0, Strategy::Avalanche).unwrap();
    assert!(plan.converged);
    assert_eq!(plan.payoff_month("car"), Some(0));

    let summaries = plan.debt_summaries(&repo.list());
    assert_eq!(summaries.len(), 2);
    let paid: f64 = summaries.iter().map(|s| s.total_paid).sum();
    assert!((paid - plan.total_paid()).abs() < 1e-6);
    // Everything paid is principal plus interest
    assert!((paid - (4600.0 + plan.total_interest_paid)).abs() < EPS);
}

#[test]
fn test_plan_json_shape() {
    let plan = simulate(&household_debts(), 800.0, Strategy::Avalanche).unwrap();
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["totalMonths"], plan.total_months);
    assert_eq!(json["strategy"], "avalanche");
    let first = &json["schedule"][0]["payments"][0];
    assert_eq!(first["debtId"], "cc");
    assert!(first.get("minimumApplied").is_some());
    assert!(first.get("extraApplied").is_some());
}
