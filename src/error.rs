//! Error types for transplan.

use thiserror::Error;

/// Error type for planning operations.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Input rejected before the solver ran.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No plan can satisfy every demand point, or the program is unbounded.
    #[error("Infeasible: {0}")]
    Infeasible(String),

    /// The solver stopped without reaching a verdict.
    #[error("Solver failure: {0}")]
    SolverFailure(String),

    /// A plan broke one of its supply, demand or sign constraints.
    #[error("Plan violation: {0}")]
    PlanViolation(String),
}

impl PlanError {
    /// Check if this error reports an infeasible problem.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, PlanError::Infeasible(_))
    }

    /// Check if this error reports rejected input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PlanError::InvalidInput(_))
    }
}

/// Result type for planning operations.
pub type Result<T> = std::result::Result<T, PlanError>;
