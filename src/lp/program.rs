//! Program definition and solving API.
//!
//! Use the builder pattern to construct programs:
//! ```ignore
//! let solution = LinearProgram::minimize(vec![5.0, 3.0])
//!     .subject_to([LinearExpr::sum([0, 1]).leq(100.0)])
//!     .solve()?;
//! ```

use super::constraint::LinearConstraint;
use crate::error::{PlanError, Result};
use crate::solver::{solve, stuff_program, LpSolution, Settings, SolveStatus};

/// A linear program: minimize `c'x` subject to the rows, with `x >= 0`.
#[derive(Debug, Clone)]
pub struct LinearProgram {
    /// Objective coefficients, one per variable.
    pub objective: Vec<f64>,
    /// Constraint rows.
    pub constraints: Vec<LinearConstraint>,
}

impl LinearProgram {
    /// Create a minimization program over `objective.len()` variables.
    pub fn minimize(objective: Vec<f64>) -> LinearProgramBuilder {
        LinearProgramBuilder {
            objective,
            constraints: Vec::new(),
        }
    }

    /// Number of decision variables.
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Number of equality rows.
    pub fn num_equalities(&self) -> usize {
        self.constraints.iter().filter(|c| c.is_equality()).count()
    }

    /// Number of inequality rows.
    pub fn num_inequalities(&self) -> usize {
        self.constraints.len() - self.num_equalities()
    }

    /// Evaluate the objective at `x`.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.iter().zip(x).map(|(c, xi)| c * xi).sum()
    }

    /// Check dimensions and finiteness.
    pub fn validate(&self) -> Result<()> {
        let n = self.num_vars();
        if n == 0 {
            return Err(PlanError::InvalidInput("program has no variables".into()));
        }
        if let Some(col) = self.objective.iter().position(|c| !c.is_finite()) {
            return Err(PlanError::InvalidInput(format!(
                "objective coefficient {} is not finite",
                col
            )));
        }
        for (i, c) in self.constraints.iter().enumerate() {
            if let Some(col) = c.expr.max_column() {
                if col >= n {
                    return Err(PlanError::InvalidInput(format!(
                        "constraint {} references column {} but the program has {} variables",
                        i, col, n
                    )));
                }
            }
            if !c.is_finite() {
                return Err(PlanError::InvalidInput(format!(
                    "constraint {} has a non-finite coefficient or right-hand side",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Solve the program with default settings.
    pub fn solve(&self) -> Result<LpSolution> {
        self.solve_with(&Settings::default())
    }

    /// Solve the program with custom settings.
    pub fn solve_with(&self, settings: &Settings) -> Result<LpSolution> {
        self.validate()?;

        let stuffed = stuff_program(self);
        tracing::debug!(
            vars = self.num_vars(),
            equalities = stuffed.cone_dims.zero,
            inequalities = stuffed.cone_dims.nonneg,
            "stuffed linear program"
        );

        let solution = solve(&stuffed, settings)?;
        tracing::debug!(
            status = ?solution.status,
            iterations = solution.iterations,
            solve_time = solution.solve_time,
            "solver finished"
        );

        match solution.status {
            SolveStatus::Optimal => Ok(solution),
            SolveStatus::Infeasible => Err(PlanError::Infeasible("program is infeasible".into())),
            SolveStatus::Unbounded => Err(PlanError::Infeasible("program is unbounded".into())),
            SolveStatus::MaxIterations => {
                Err(PlanError::SolverFailure("maximum iterations reached".into()))
            }
            SolveStatus::NumericalError => Err(PlanError::SolverFailure(
                "solver encountered numerical difficulties".into(),
            )),
            SolveStatus::Unknown => {
                Err(PlanError::SolverFailure("unknown solver status".into()))
            }
        }
    }
}

/// Builder for constructing programs.
#[derive(Debug, Clone)]
pub struct LinearProgramBuilder {
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl LinearProgramBuilder {
    /// Add constraints to the program.
    pub fn subject_to(mut self, constraints: impl IntoIterator<Item = LinearConstraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Add a single constraint.
    pub fn constraint(mut self, c: LinearConstraint) -> Self {
        self.constraints.push(c);
        self
    }

    /// Build the program.
    pub fn build(self) -> LinearProgram {
        LinearProgram {
            objective: self.objective,
            constraints: self.constraints,
        }
    }

    /// Build and solve the program with default settings.
    pub fn solve(self) -> Result<LpSolution> {
        self.build().solve()
    }

    /// Build and solve the program with custom settings.
    pub fn solve_with(self, settings: &Settings) -> Result<LpSolution> {
        self.build().solve_with(settings)
    }
}
