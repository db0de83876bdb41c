//! Clarabel solver integration.
//!
//! This module provides the interface to the Clarabel interior-point solver.

use clarabel::algebra::CscMatrix as ClarabelCsc;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};

use super::stuffing::{ConeDims, StuffedProgram};
use crate::error::{PlanError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Solution status from the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// Program is infeasible.
    Infeasible,
    /// Program is unbounded.
    Unbounded,
    /// Iteration or time limit reached.
    MaxIterations,
    /// Numerical difficulties.
    NumericalError,
    /// Unknown status.
    Unknown,
}

impl From<SolverStatus> for SolveStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved | SolverStatus::AlmostSolved => SolveStatus::Optimal,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                SolveStatus::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                SolveStatus::Unbounded
            }
            SolverStatus::MaxIterations | SolverStatus::MaxTime => SolveStatus::MaxIterations,
            SolverStatus::NumericalError | SolverStatus::InsufficientProgress => {
                SolveStatus::NumericalError
            }
            _ => SolveStatus::Unknown,
        }
    }
}

/// Solver settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Print solver output.
    pub verbose: bool,
    /// Maximum iterations.
    pub max_iter: u32,
    /// Time limit in seconds.
    pub time_limit: f64,
    /// Absolute tolerance.
    pub tol_gap_abs: f64,
    /// Relative tolerance.
    pub tol_gap_rel: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            verbose: false,
            max_iter: 100,
            time_limit: f64::INFINITY,
            tol_gap_abs: 1e-8,
            tol_gap_rel: 1e-8,
        }
    }
}

impl Settings {
    /// Builder: set the iteration limit.
    pub fn with_max_iter(mut self, max_iter: u32) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Builder: set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    /// Builder: toggle solver output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Solution from the solver.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Solution status.
    pub status: SolveStatus,
    /// Optimal value (if solved).
    pub value: Option<f64>,
    /// Primal variable values (if solved).
    pub primal: Option<Vec<f64>>,
    /// Dual values of the user constraints, in the order they were added (if solved).
    pub dual: Option<Vec<f64>>,
    /// Solve time in seconds.
    pub solve_time: f64,
    /// Number of iterations.
    pub iterations: u32,
}

impl LpSolution {
    /// Get the value of variable `col`.
    pub fn get_value(&self, col: usize) -> Option<f64> {
        self.primal.as_ref().and_then(|p| p.get(col).copied())
    }

    /// Get the dual value for a specific constraint by index.
    ///
    /// Clarabel's duals satisfy `c + A'z = 0`, so `z` is the negated change
    /// in the optimal value per unit increase of the constraint's right-hand side.
    /// Use [`LpSolution::marginal`] for the un-negated figure.
    pub fn constraint_dual(&self, idx: usize) -> Option<f64> {
        self.dual.as_ref().and_then(|d| d.get(idx).copied())
    }

    /// Change in the optimal value per unit increase of constraint `idx`'s right-hand side.
    pub fn marginal(&self, idx: usize) -> Option<f64> {
        self.constraint_dual(idx).map(|z| -z)
    }

    /// Check if the solution has dual values available.
    pub fn has_duals(&self) -> bool {
        self.dual.is_some()
    }
}

/// Solve the stuffed program using Clarabel.
pub fn solve(program: &StuffedProgram, settings: &Settings) -> Result<LpSolution> {
    let p = to_clarabel_csc(&program.p);
    let a = to_clarabel_csc(&program.a);
    let cones = to_clarabel_cones(&program.cone_dims);

    let clarabel_settings = DefaultSettingsBuilder::default()
        .verbose(settings.verbose)
        .max_iter(settings.max_iter)
        .time_limit(settings.time_limit)
        .tol_gap_abs(settings.tol_gap_abs)
        .tol_gap_rel(settings.tol_gap_rel)
        .build()
        .map_err(|e| PlanError::SolverFailure(format!("invalid solver settings: {}", e)))?;

    let mut solver = DefaultSolver::new(&p, &program.q, &a, &program.b, &cones, clarabel_settings);
    solver.solve();

    let status: SolveStatus = solver.solution.status.into();
    let solve_time = solver.solution.solve_time;
    let iterations = solver.info.iterations;

    if status != SolveStatus::Optimal {
        return Ok(LpSolution {
            status,
            value: None,
            primal: None,
            dual: None,
            solve_time,
            iterations,
        });
    }

    let x = solver.solution.x.clone();
    let value = compute_objective(&x, &program.q);
    let dual = program
        .constraint_rows
        .iter()
        .map(|&row| solver.solution.z[row])
        .collect();

    Ok(LpSolution {
        status,
        value: Some(value),
        primal: Some(x),
        dual: Some(dual),
        solve_time,
        iterations,
    })
}

/// Convert nalgebra CSC to Clarabel CSC.
fn to_clarabel_csc(m: &nalgebra_sparse::CscMatrix<f64>) -> ClarabelCsc<f64> {
    ClarabelCsc::new(
        m.nrows(),
        m.ncols(),
        m.col_offsets().to_vec(),
        m.row_indices().to_vec(),
        m.values().to_vec(),
    )
}

/// Convert cone dimensions to Clarabel cones.
fn to_clarabel_cones(dims: &ConeDims) -> Vec<SupportedConeT<f64>> {
    let mut cones = Vec::new();

    if dims.zero > 0 {
        cones.push(SupportedConeT::ZeroConeT(dims.zero));
    }

    if dims.nonneg > 0 {
        cones.push(SupportedConeT::NonnegativeConeT(dims.nonneg));
    }

    cones
}

/// Compute objective value: q' x.
fn compute_objective(x: &[f64], q: &[f64]) -> f64 {
    q.iter().zip(x.iter()).map(|(qi, xi)| qi * xi).sum()
}
