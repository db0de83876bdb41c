//! Linear program for the transportation problem.
//!
//! With `m` supply points and `n` demand points:
//!
//! ```text
//! minimize    sum_ij cost[i,j] * x[i*n + j]
//! subject to  sum_j x[i*n + j] <= available[i]    (rows 0..m)
//!             sum_i x[i*n + j] == required[j]     (rows m..m+n)
//!             x >= 0
//! ```

use crate::lp::{LinearExpr, LinearProgram};
use crate::model::TransportProblem;

/// Column of the variable shipping from supply point `i` to demand point `j`.
pub fn variable_index(i: usize, j: usize, num_demand: usize) -> usize {
    i * num_demand + j
}

/// Constraint row of supply point `i`.
pub fn supply_row(i: usize) -> usize {
    i
}

/// Constraint row of demand point `j`.
pub fn demand_row(j: usize, num_supply: usize) -> usize {
    num_supply + j
}

/// Build the linear program for `problem`.
pub fn formulate(problem: &TransportProblem) -> LinearProgram {
    let m = problem.supply().len();
    let n = problem.demand().len();

    // row-major, matching variable_index
    let objective: Vec<f64> = (0..m)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .map(|(i, j)| problem.unit_cost(i, j))
        .collect();

    let supply_rows = problem.supply().iter().enumerate().map(|(i, s)| {
        LinearExpr::sum((0..n).map(|j| variable_index(i, j, n))).leq(s.available as f64)
    });

    let demand_rows = problem.demand().iter().enumerate().map(|(j, d)| {
        LinearExpr::sum((0..m).map(|i| variable_index(i, j, n))).equals(d.required as f64)
    });

    LinearProgram::minimize(objective)
        .subject_to(supply_rows)
        .subject_to(demand_rows)
        .build()
}
