/// Errors returned by the payoff planner.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("plan did not converge after {months} months: {outstanding:.2} still owed")]
    NonConvergent { months: u32, outstanding: f64 },
}

impl PlanError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        PlanError::InvalidInput {
            reason: reason.into(),
        }
    }
}
