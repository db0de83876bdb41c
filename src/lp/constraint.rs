//! Constraint rows for linear programs.
//!
//! Rows map to cones in the solver:
//! - LessEqual: a'x <= b (nonnegative orthant on the slack)
//! - Equal: a'x == b (zero cone)

use std::fmt;

/// A sparse linear expression `sum coeff * x[col]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(usize, f64)>,
}

impl LinearExpr {
    /// Create an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the expression `x[a] + x[b] + ...` over the given columns.
    pub fn sum(cols: impl IntoIterator<Item = usize>) -> Self {
        Self {
            terms: cols.into_iter().map(|col| (col, 1.0)).collect(),
        }
    }

    /// Add `coeff * x[col]` to the expression.
    pub fn term(mut self, col: usize, coeff: f64) -> Self {
        self.terms.push((col, coeff));
        self
    }

    /// The `(column, coefficient)` terms. Repeated columns are summed by the solver.
    pub fn terms(&self) -> &[(usize, f64)] {
        &self.terms
    }

    /// Largest column referenced, if any.
    pub fn max_column(&self) -> Option<usize> {
        self.terms.iter().map(|(col, _)| *col).max()
    }

    /// Evaluate the expression at `x`. Columns beyond `x` count as zero.
    pub fn eval(&self, x: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(col, coeff)| coeff * x.get(col).copied().unwrap_or(0.0))
            .sum()
    }

    /// Create constraint: self <= rhs.
    pub fn leq(self, rhs: f64) -> LinearConstraint {
        LinearConstraint {
            expr: self,
            sense: Sense::LessEqual,
            rhs,
        }
    }

    /// Create constraint: self == rhs.
    pub fn equals(self, rhs: f64) -> LinearConstraint {
        LinearConstraint {
            expr: self,
            sense: Sense::Equal,
            rhs,
        }
    }
}

/// Direction of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// a'x <= b.
    LessEqual,
    /// a'x == b.
    Equal,
}

/// A single constraint row of a linear program.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Row direction.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Check if this is an equality row.
    pub fn is_equality(&self) -> bool {
        self.sense == Sense::Equal
    }

    /// Amount by which `x` violates this row (0 when satisfied).
    pub fn violation(&self, x: &[f64]) -> f64 {
        let lhs = self.expr.eval(x);
        match self.sense {
            Sense::LessEqual => (lhs - self.rhs).max(0.0),
            Sense::Equal => (lhs - self.rhs).abs(),
        }
    }

    /// Check if every coefficient and the right-hand side are finite.
    pub fn is_finite(&self) -> bool {
        self.rhs.is_finite() && self.expr.terms.iter().all(|(_, c)| c.is_finite())
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expr.terms.is_empty() {
            write!(f, "0")?;
        }
        for (k, (col, coeff)) in self.expr.terms.iter().enumerate() {
            if k > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*x{}", coeff, col)?;
        }
        let op = match self.sense {
            Sense::LessEqual => "<=",
            Sense::Equal => "==",
        };
        write!(f, " {} {}", op, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_expression() {
        let expr = LinearExpr::sum([0, 2, 3]);
        assert_eq!(expr.terms(), &[(0, 1.0), (2, 1.0), (3, 1.0)]);
        assert_eq!(expr.max_column(), Some(3));
        assert_eq!(expr.eval(&[1.0, 10.0, 2.0, 3.0]), 6.0);
    }

    #[test]
    fn test_leq_violation() {
        let c = LinearExpr::new().term(0, 2.0).term(1, 1.0).leq(10.0);
        assert!(!c.is_equality());
        assert_eq!(c.violation(&[3.0, 3.0]), 0.0);
        assert_eq!(c.violation(&[5.0, 3.0]), 3.0);
    }

    #[test]
    fn test_equality_violation() {
        let c = LinearExpr::sum([0, 1]).equals(4.0);
        assert!(c.is_equality());
        assert_eq!(c.violation(&[1.0, 1.0]), 2.0);
        assert_eq!(c.violation(&[3.0, 3.0]), 2.0);
    }

    #[test]
    fn test_non_finite_rows() {
        assert!(!LinearExpr::sum([0]).leq(f64::INFINITY).is_finite());
        assert!(!LinearExpr::new().term(0, f64::NAN).equals(1.0).is_finite());
        assert!(LinearExpr::sum([0]).equals(1.0).is_finite());
    }

    #[test]
    fn test_display() {
        let c = LinearExpr::new().term(0, 2.0).term(3, 1.5).leq(7.0);
        assert_eq!(c.to_string(), "2*x0 + 1.5*x3 <= 7");
    }
}
