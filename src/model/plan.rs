//! Shipment plans produced by the planner.

use nalgebra::DMatrix;

use super::problem::TransportProblem;
use crate::error::{PlanError, Result};

/// Units moved along one route.
#[derive(Debug, Clone, PartialEq)]
pub struct Shipment<'a> {
    /// Supply point identifier.
    pub from: &'a str,
    /// Demand point identifier.
    pub to: &'a str,
    /// Units shipped.
    pub quantity: f64,
    /// Cost of the shipment (`quantity * unit cost`).
    pub cost: f64,
}

/// Dual values of the supply and demand rows at the optimum.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDuals {
    /// Change in total cost per extra unit of stock at each supply point (<= 0).
    pub supply_shadow_prices: Vec<f64>,
    /// Change in total cost per extra unit required at each demand point.
    pub demand_marginal_costs: Vec<f64>,
}

/// Quantities shipped on every route, with the total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentPlan {
    supply_ids: Vec<String>,
    demand_ids: Vec<String>,
    quantities: DMatrix<f64>,
    unit_costs: DMatrix<f64>,
    total_cost: f64,
    duals: Option<PlanDuals>,
}

impl ShipmentPlan {
    /// Create a plan for `problem` from a `supply x demand` quantity matrix.
    ///
    /// The total cost is computed from the quantities.
    ///
    /// # Panics
    ///
    /// Panics if `quantities` is not `supply x demand` for `problem`.
    pub fn new(problem: &TransportProblem, quantities: DMatrix<f64>) -> Self {
        let unit_costs = problem.costs().clone();
        let total_cost = quantities.component_mul(&unit_costs).sum();
        Self {
            supply_ids: problem.supply().iter().map(|s| s.id.clone()).collect(),
            demand_ids: problem.demand().iter().map(|d| d.id.clone()).collect(),
            quantities,
            unit_costs,
            total_cost,
            duals: None,
        }
    }

    /// Create the all-zero plan for `problem`.
    pub fn empty(problem: &TransportProblem) -> Self {
        let quantities = DMatrix::zeros(problem.supply().len(), problem.demand().len());
        Self::new(problem, quantities)
    }

    /// Builder: attach dual values.
    pub fn with_duals(mut self, duals: PlanDuals) -> Self {
        self.duals = Some(duals);
        self
    }

    /// Total transport cost of the plan.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Quantity matrix, `supply x demand`.
    pub fn quantities(&self) -> &DMatrix<f64> {
        &self.quantities
    }

    /// Dual values, when the plan came from a solver run.
    pub fn duals(&self) -> Option<&PlanDuals> {
        self.duals.as_ref()
    }

    /// Supply point identifiers in row order.
    pub fn supply_ids(&self) -> &[String] {
        &self.supply_ids
    }

    /// Demand point identifiers in column order.
    pub fn demand_ids(&self) -> &[String] {
        &self.demand_ids
    }

    /// Quantity shipped on a route, by identifiers.
    pub fn quantity(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.supply_ids.iter().position(|id| id == from)?;
        let j = self.demand_ids.iter().position(|id| id == to)?;
        Some(self.quantities[(i, j)])
    }

    /// Total shipped out of supply point `i`.
    pub fn shipped_from(&self, i: usize) -> f64 {
        self.quantities.row(i).sum()
    }

    /// Total received by demand point `j`.
    pub fn received_by(&self, j: usize) -> f64 {
        self.quantities.column(j).sum()
    }

    /// Routes carrying more than `min_quantity` units, in row-major order.
    pub fn shipments(&self, min_quantity: f64) -> Vec<Shipment<'_>> {
        let mut result = Vec::new();
        for (i, from) in self.supply_ids.iter().enumerate() {
            for (j, to) in self.demand_ids.iter().enumerate() {
                let quantity = self.quantities[(i, j)];
                if quantity > min_quantity {
                    result.push(Shipment {
                        from: from.as_str(),
                        to: to.as_str(),
                        quantity,
                        cost: quantity * self.unit_costs[(i, j)],
                    });
                }
            }
        }
        result
    }

    /// Check the plan against `problem` within `tol`.
    ///
    /// Every quantity must be non-negative, no supply point may ship more than
    /// its stock and every demand point must receive exactly its requirement.
    pub fn verify(&self, problem: &TransportProblem, tol: f64) -> Result<()> {
        if self.quantities.shape() != (problem.supply().len(), problem.demand().len()) {
            return Err(PlanError::PlanViolation(format!(
                "plan is {:?} but the problem has {} supply and {} demand points",
                self.quantities.shape(),
                problem.supply().len(),
                problem.demand().len()
            )));
        }

        for (i, from) in self.supply_ids.iter().enumerate() {
            for (j, to) in self.demand_ids.iter().enumerate() {
                let q = self.quantities[(i, j)];
                if q < -tol || !q.is_finite() {
                    return Err(PlanError::PlanViolation(format!(
                        "route ({}, {}) ships {}",
                        from, to, q
                    )));
                }
            }
        }

        for (i, s) in problem.supply().iter().enumerate() {
            let shipped = self.shipped_from(i);
            if shipped > s.available as f64 + tol {
                return Err(PlanError::PlanViolation(format!(
                    "supply point '{}' ships {} but holds {}",
                    s.id, shipped, s.available
                )));
            }
        }

        for (j, d) in problem.demand().iter().enumerate() {
            let received = self.received_by(j);
            if (received - d.required as f64).abs() > tol {
                return Err(PlanError::PlanViolation(format!(
                    "demand point '{}' receives {} but requires {}",
                    d.id, received, d.required
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CostMatrix, DemandPoint, SupplyPoint};

    fn problem() -> TransportProblem {
        TransportProblem::new(
            vec![SupplyPoint::new("CD_1", 100)],
            vec![DemandPoint::new("A", 60), DemandPoint::new("B", 40)],
            &CostMatrix::new().with("CD_1", "A", 5.0).with("CD_1", "B", 3.0),
        )
        .expect("valid")
    }

    #[test]
    fn test_total_cost_from_quantities() {
        let plan = ShipmentPlan::new(&problem(), DMatrix::from_row_slice(1, 2, &[60.0, 40.0]));
        assert_eq!(plan.total_cost(), 420.0);
        assert_eq!(plan.quantity("CD_1", "B"), Some(40.0));
        assert_eq!(plan.quantity("CD_1", "C"), None);
        assert_eq!(plan.shipped_from(0), 100.0);
        assert_eq!(plan.received_by(0), 60.0);
        assert!(plan.duals().is_none());
        plan.verify(&problem(), 1e-9).expect("valid plan");
    }

    #[test]
    fn test_shipments_skip_empty_routes() {
        let plan = ShipmentPlan::new(&problem(), DMatrix::from_row_slice(1, 2, &[60.0, 0.0]));
        let shipments = plan.shipments(0.5);
        assert_eq!(shipments.len(), 1);
        assert_eq!(shipments[0].to, "A");
        assert_eq!(shipments[0].cost, 300.0);
    }

    #[test]
    fn test_verify_catches_short_demand() {
        let plan = ShipmentPlan::new(&problem(), DMatrix::from_row_slice(1, 2, &[60.0, 30.0]));
        let err = plan.verify(&problem(), 1e-6).unwrap_err();
        assert!(err.to_string().contains("'B' receives 30"));
    }

    #[test]
    fn test_verify_catches_over_shipping() {
        let problem = TransportProblem::new(
            vec![SupplyPoint::new("CD_1", 50)],
            vec![DemandPoint::new("A", 60)],
            &CostMatrix::new().with("CD_1", "A", 1.0),
        )
        .expect("valid");
        let plan = ShipmentPlan::new(&problem, DMatrix::from_row_slice(1, 1, &[60.0]));
        let err = plan.verify(&problem, 1e-6).unwrap_err();
        assert!(err.to_string().contains("'CD_1' ships 60 but holds 50"));
    }

    #[test]
    fn test_verify_catches_negative_quantity() {
        let plan = ShipmentPlan::new(&problem(), DMatrix::from_row_slice(1, 2, &[-1.0, 40.0]));
        let err = plan.verify(&problem(), 1e-6).unwrap_err();
        assert!(matches!(err, PlanError::PlanViolation(_)));
    }

    #[test]
    fn test_empty_plan() {
        let plan = ShipmentPlan::empty(&problem());
        assert_eq!(plan.total_cost(), 0.0);
        assert!(plan.shipments(0.0).is_empty());
    }
}
