//! Matrix stuffing: converts a linear program to solver format.
//!
//! Clarabel solves `min (1/2) x'Px + q'x` s.t. `Ax + s = b`, `s in K`.
//! A linear program has `P = 0`. Rows are laid out as:
//! 1. equality rows (zero cone)
//! 2. `<=` rows (nonnegative cone)
//! 3. `-x <= 0` bound rows (nonnegative cone)

use nalgebra_sparse::CscMatrix;

use crate::lp::{LinearConstraint, LinearProgram};
use crate::sparse::{csc_from_triplets, csc_neg_identity, csc_vstack};

/// Cone dimensions for Clarabel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConeDims {
    /// Number of zero cone (equality) rows.
    pub zero: usize,
    /// Number of nonnegative cone rows, bounds included.
    pub nonneg: usize,
}

impl ConeDims {
    /// Total number of constraint rows.
    pub fn total(&self) -> usize {
        self.zero + self.nonneg
    }
}

/// Stuffed program ready for Clarabel.
#[derive(Debug)]
pub struct StuffedProgram {
    /// Quadratic cost matrix P (n x n, always empty for an LP).
    pub p: CscMatrix<f64>,
    /// Linear cost vector q (n).
    pub q: Vec<f64>,
    /// Constraint matrix A (m x n).
    pub a: CscMatrix<f64>,
    /// Constraint vector b (m).
    pub b: Vec<f64>,
    /// Cone dimensions.
    pub cone_dims: ConeDims,
    /// Row of A holding each user constraint, in the order they were added.
    pub constraint_rows: Vec<usize>,
}

impl StuffedProgram {
    /// Number of optimization variables.
    pub fn num_vars(&self) -> usize {
        self.q.len()
    }
}

/// Build the stuffed program from a linear program.
pub fn stuff_program(program: &LinearProgram) -> StuffedProgram {
    let n = program.num_vars();

    let (equalities, inequalities): (Vec<_>, Vec<_>) = program
        .constraints
        .iter()
        .enumerate()
        .partition(|(_, c)| c.is_equality());

    let zero_rows = equalities.len();
    let mut constraint_rows = vec![0; program.constraints.len()];
    for (row, (k, _)) in equalities.iter().enumerate() {
        constraint_rows[*k] = row;
    }
    for (row, (k, _)) in inequalities.iter().enumerate() {
        constraint_rows[*k] = zero_rows + row;
    }

    let eq_block = stuff_rows(equalities.iter().map(|(_, c)| *c), n);
    let ineq_block = stuff_rows(inequalities.iter().map(|(_, c)| *c), n);
    let bounds = csc_neg_identity(n);
    let a = csc_vstack(&[&eq_block, &ineq_block, &bounds]);

    let mut b = Vec::with_capacity(a.nrows());
    b.extend(equalities.iter().map(|(_, c)| c.rhs));
    b.extend(inequalities.iter().map(|(_, c)| c.rhs));
    b.extend(std::iter::repeat(0.0).take(n));

    let cone_dims = ConeDims {
        zero: zero_rows,
        nonneg: inequalities.len() + n,
    };

    StuffedProgram {
        p: CscMatrix::zeros(n, n),
        q: program.objective.clone(),
        a,
        b,
        cone_dims,
        constraint_rows,
    }
}

/// Stuff a block of rows into a CSC matrix with `n` columns.
fn stuff_rows<'a>(rows: impl Iterator<Item = &'a LinearConstraint>, n: usize) -> CscMatrix<f64> {
    let mut a_rows = Vec::new();
    let mut a_cols = Vec::new();
    let mut a_vals = Vec::new();
    let mut nrows = 0;

    for (row, c) in rows.enumerate() {
        for &(col, coeff) in c.expr.terms() {
            a_rows.push(row);
            a_cols.push(col);
            a_vals.push(coeff);
        }
        nrows = row + 1;
    }

    csc_from_triplets(nrows, n, a_rows, a_cols, a_vals)
}
