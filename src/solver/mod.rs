//! Solver interface for transplan.
//!
//! This module provides:
//! - Matrix stuffing to convert linear programs to solver format
//! - Clarabel solver integration

pub mod clarabel;
pub mod stuffing;

pub use self::clarabel::{solve, LpSolution, Settings, SolveStatus};
pub use stuffing::{stuff_program, ConeDims, StuffedProgram};
