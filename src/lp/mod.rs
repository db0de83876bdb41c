//! Linear programs in standard form.
//!
//! A [`LinearProgram`] is `minimize c'x` subject to `<=` and `=` rows over
//! non-negative variables. Solving hands the program to Clarabel; this module
//! only describes the program and checks its dimensions.

mod constraint;
mod program;

pub use constraint::{LinearConstraint, LinearExpr, Sense};
pub use program::{LinearProgram, LinearProgramBuilder};
