//! The transportation planner.

use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::formulation::{demand_row, formulate, supply_row, variable_index};
use crate::error::{PlanError, Result};
use crate::model::{CostMatrix, DemandPoint, PlanDuals, ShipmentPlan, SupplyPoint, TransportProblem};
use crate::solver::Settings;

/// Planner configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Settings passed to the LP solver.
    pub solver: Settings,

    /// Round shipped quantities to whole units.
    ///
    /// Skipped, with a warning, when the rounded plan would break a supply or
    /// demand constraint.
    pub round_quantities: bool,

    /// Feasibility tolerance, relative to the larger of total demand and 1.
    pub tolerance: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            solver: Settings::default(),
            round_quantities: false,
            tolerance: 1e-6,
        }
    }
}

impl PlannerConfig {
    /// Builder: set the solver settings.
    pub fn with_solver(mut self, solver: Settings) -> Self {
        self.solver = solver;
        self
    }

    /// Builder: round shipped quantities to whole units.
    pub fn with_rounding(mut self, round: bool) -> Self {
        self.round_quantities = round;
        self
    }

    /// Builder: set the relative feasibility tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Computes minimum-cost shipment plans.
#[derive(Debug, Clone, Default)]
pub struct TransportPlanner {
    config: PlannerConfig,
}

impl TransportPlanner {
    /// Create a planner with the given configuration.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The planner's configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Validate the inputs and compute a minimum-cost plan.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidInput`] for duplicate identifiers or a bad cost table
    /// - [`PlanError::Infeasible`] if total supply is below total demand, or the
    ///   solver reports the program infeasible or unbounded
    /// - [`PlanError::SolverFailure`] if the solver stops without a verdict
    pub fn solve(
        &self,
        supply: &[SupplyPoint],
        demand: &[DemandPoint],
        costs: &CostMatrix,
    ) -> Result<ShipmentPlan> {
        let problem = TransportProblem::new(supply.to_vec(), demand.to_vec(), costs)?;
        self.solve_problem(&problem)
    }

    /// Compute a minimum-cost plan for an already validated problem.
    pub fn solve_problem(&self, problem: &TransportProblem) -> Result<ShipmentPlan> {
        let m = problem.supply().len();
        let n = problem.demand().len();
        let total_supply = problem.total_supply();
        let total_demand = problem.total_demand();

        tracing::info!(
            supply_points = m,
            demand_points = n,
            %total_supply,
            %total_demand,
            "planning shipments"
        );

        if total_supply < total_demand {
            return Err(PlanError::Infeasible(format!(
                "total supply {} is less than total demand {}",
                total_supply, total_demand
            )));
        }

        if total_demand == 0 {
            tracing::debug!("nothing to ship, skipping solver");
            return Ok(ShipmentPlan::empty(problem));
        }

        let program = formulate(problem);
        let solution = program.solve_with(&self.config.solver)?;
        let x = solution
            .primal
            .as_deref()
            .ok_or_else(|| PlanError::SolverFailure("solver returned no primal values".into()))?;

        let tol = self.config.tolerance * (total_demand as f64).max(1.0);

        let mut clamped = 0;
        let mut quantities = DMatrix::zeros(m, n);
        for i in 0..m {
            for j in 0..n {
                let q = x[variable_index(i, j, n)];
                if q < -tol {
                    return Err(PlanError::SolverFailure(format!(
                        "solver shipped {} from '{}' to '{}'",
                        q,
                        problem.supply()[i].id,
                        problem.demand()[j].id
                    )));
                }
                if q < 0.0 {
                    clamped += 1;
                }
                quantities[(i, j)] = q.max(0.0);
            }
        }
        if clamped > 0 {
            tracing::debug!(clamped, "clamped negative solver noise to zero");
        }

        let duals = PlanDuals {
            supply_shadow_prices: (0..m)
                .map(|i| solution.marginal(supply_row(i)).unwrap_or(0.0))
                .collect(),
            demand_marginal_costs: (0..n)
                .map(|j| solution.marginal(demand_row(j, m)).unwrap_or(0.0))
                .collect(),
        };

        let mut plan = ShipmentPlan::new(problem, quantities).with_duals(duals.clone());

        if self.config.round_quantities {
            // whole units must meet every row exactly
            let rounded =
                ShipmentPlan::new(problem, plan.quantities().map(f64::round)).with_duals(duals);
            match rounded.verify(problem, 0.0) {
                Ok(()) => plan = rounded,
                Err(e) => tracing::warn!(error = %e, "keeping fractional plan, rounding broke it"),
            }
        }

        plan.verify(problem, tol)
            .map_err(|e| PlanError::SolverFailure(format!("solver returned a bad plan: {}", e)))?;

        tracing::info!(
            total_cost = plan.total_cost(),
            objective = ?solution.value,
            routes_used = plan.shipments(tol).len(),
            iterations = solution.iterations,
            "plan ready"
        );

        Ok(plan)
    }
}

/// Compute a minimum-cost plan with the default configuration.
pub fn solve(
    supply: &[SupplyPoint],
    demand: &[DemandPoint],
    costs: &CostMatrix,
) -> Result<ShipmentPlan> {
    TransportPlanner::default().solve(supply, demand, costs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-4;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert!(!config.round_quantities);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.solver, Settings::default());
    }

    #[test]
    fn test_config_builders() {
        let config = PlannerConfig::default()
            .with_rounding(true)
            .with_tolerance(1e-3)
            .with_solver(Settings::default().with_max_iter(10));
        assert!(config.round_quantities);
        assert_eq!(config.tolerance, 1e-3);
        assert_eq!(config.solver.max_iter, 10);
        assert_eq!(TransportPlanner::new(config.clone()).config(), &config);
    }

    #[test]
    fn test_single_center_two_stores() {
        let supply = [SupplyPoint::new("CD1", 100)];
        let demand = [DemandPoint::new("A", 60), DemandPoint::new("B", 40)];
        let costs = CostMatrix::new().with("CD1", "A", 5.0).with("CD1", "B", 3.0);

        let plan = solve(&supply, &demand, &costs).expect("feasible");
        assert!((plan.total_cost() - 420.0).abs() < TOL, "got {}", plan.total_cost());
        assert!((plan.quantity("CD1", "A").unwrap() - 60.0).abs() < TOL);
        assert!((plan.quantity("CD1", "B").unwrap() - 40.0).abs() < TOL);
    }

    #[test]
    fn test_shortfall_is_infeasible() {
        let supply = [SupplyPoint::new("CD1", 50)];
        let demand = [DemandPoint::new("A", 60)];
        let costs = CostMatrix::new().with("CD1", "A", 1.0);

        let err = solve(&supply, &demand, &costs).unwrap_err();
        assert!(err.is_infeasible());
        assert!(err.to_string().contains("total supply 50 is less than total demand 60"));
    }

    #[test]
    fn test_zero_demand_skips_solver() {
        let supply = [SupplyPoint::new("CD1", 10)];
        let demand = [DemandPoint::new("A", 0)];
        let costs = CostMatrix::new().with("CD1", "A", 4.0);

        let plan = solve(&supply, &demand, &costs).expect("trivial");
        assert_eq!(plan.total_cost(), 0.0);
        assert!(plan.duals().is_none());
    }

    #[test]
    fn test_invalid_input_before_solver() {
        let supply = [SupplyPoint::new("CD1", 10)];
        let demand = [DemandPoint::new("A", 5)];
        let err = solve(&supply, &demand, &CostMatrix::new()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rounding_yields_whole_units() {
        let supply = [SupplyPoint::new("CD1", 100), SupplyPoint::new("CD2", 100)];
        let demand = [DemandPoint::new("A", 70), DemandPoint::new("B", 90)];
        let costs = CostMatrix::new()
            .with("CD1", "A", 2.0)
            .with("CD1", "B", 6.0)
            .with("CD2", "A", 5.0)
            .with("CD2", "B", 1.0);

        let planner = TransportPlanner::new(PlannerConfig::default().with_rounding(true));
        let plan = planner.solve(&supply, &demand, &costs).expect("feasible");
        assert!(plan.quantities().iter().all(|q| q.fract() == 0.0));
        assert_eq!(plan.quantity("CD1", "A"), Some(70.0));
        assert_eq!(plan.quantity("CD2", "B"), Some(90.0));
        assert_eq!(plan.total_cost(), 230.0);
    }
}
