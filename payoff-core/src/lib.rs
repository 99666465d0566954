//! payoff-core: debt model and the month-by-month payoff simulator

pub mod compare;
pub mod debt;
pub mod error;
pub mod repository;
pub mod schedule;
pub mod simulator;

pub use compare::{compare_strategies, StrategyComparison};
pub use debt::{Debt, Strategy};
pub use error::PlanError;
pub use repository::{DebtRepository, InMemoryDebtRepository};
pub use schedule::{DebtSummary, OutstandingBalance, Payment, PlanResult, ScheduleRow};
pub use simulator::{simulate, PayoffSimulator, DEFAULT_EPSILON, DEFAULT_MAX_MONTHS};
