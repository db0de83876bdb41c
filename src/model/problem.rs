//! The validated transportation problem.

use std::collections::HashMap;

use nalgebra::DMatrix;

use super::cost::CostMatrix;
use super::point::{DemandPoint, SupplyPoint};
use crate::error::{PlanError, Result};

/// Supply points, demand points and a complete unit cost table.
///
/// Construction checks everything that does not need the solver: unique
/// identifiers, a finite non-negative cost for every route and no cost for an
/// unknown point. Feasibility (enough stock) is left to the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportProblem {
    supply: Vec<SupplyPoint>,
    demand: Vec<DemandPoint>,
    /// Unit costs, `supply x demand`.
    costs: DMatrix<f64>,
}

impl TransportProblem {
    /// Validate the inputs and build the problem.
    pub fn new(
        supply: Vec<SupplyPoint>,
        demand: Vec<DemandPoint>,
        costs: &CostMatrix,
    ) -> Result<Self> {
        let supply_index = index_ids(supply.iter().map(|s| s.id.as_str()), "supply")?;
        let demand_index = index_ids(demand.iter().map(|d| d.id.as_str()), "demand")?;

        for (from, to, unit_cost) in costs.iter() {
            if !supply_index.contains_key(from) {
                return Err(PlanError::InvalidInput(format!(
                    "cost entry ({}, {}) names unknown supply point '{}'",
                    from, to, from
                )));
            }
            if !demand_index.contains_key(to) {
                return Err(PlanError::InvalidInput(format!(
                    "cost entry ({}, {}) names unknown demand point '{}'",
                    from, to, to
                )));
            }
            if !unit_cost.is_finite() || unit_cost < 0.0 {
                return Err(PlanError::InvalidInput(format!(
                    "unit cost for ({}, {}) must be finite and non-negative, got {}",
                    from, to, unit_cost
                )));
            }
        }

        let mut grid = DMatrix::zeros(supply.len(), demand.len());
        for (i, s) in supply.iter().enumerate() {
            for (j, d) in demand.iter().enumerate() {
                grid[(i, j)] = costs.get(&s.id, &d.id).ok_or_else(|| {
                    PlanError::InvalidInput(format!("missing unit cost for ({}, {})", s.id, d.id))
                })?;
            }
        }

        Ok(Self {
            supply,
            demand,
            costs: grid,
        })
    }

    /// Supply points in input order.
    pub fn supply(&self) -> &[SupplyPoint] {
        &self.supply
    }

    /// Demand points in input order.
    pub fn demand(&self) -> &[DemandPoint] {
        &self.demand
    }

    /// Unit cost matrix, `supply x demand`.
    pub fn costs(&self) -> &DMatrix<f64> {
        &self.costs
    }

    /// Unit cost from supply point `i` to demand point `j`.
    pub fn unit_cost(&self, i: usize, j: usize) -> f64 {
        self.costs[(i, j)]
    }

    /// Number of `(supply, demand)` routes.
    pub fn num_routes(&self) -> usize {
        self.supply.len() * self.demand.len()
    }

    /// Total stock over all supply points. Summed in `u128` so it cannot overflow.
    pub fn total_supply(&self) -> u128 {
        self.supply.iter().map(|s| u128::from(s.available)).sum()
    }

    /// Total requirement over all demand points. Summed in `u128` so it cannot overflow.
    pub fn total_demand(&self) -> u128 {
        self.demand.iter().map(|d| u128::from(d.required)).sum()
    }

    /// Check if total supply equals total demand.
    pub fn is_balanced(&self) -> bool {
        self.total_supply() == self.total_demand()
    }

    /// Position of a supply point by identifier.
    pub fn supply_index(&self, id: &str) -> Option<usize> {
        self.supply.iter().position(|s| s.id == id)
    }

    /// Position of a demand point by identifier.
    pub fn demand_index(&self, id: &str) -> Option<usize> {
        self.demand.iter().position(|d| d.id == id)
    }
}

/// Map identifiers to positions, rejecting duplicates.
fn index_ids<'a>(ids: impl Iterator<Item = &'a str>, side: &str) -> Result<HashMap<&'a str, usize>> {
    let mut index = HashMap::new();
    for (pos, id) in ids.enumerate() {
        if index.insert(id, pos).is_some() {
            return Err(PlanError::InvalidInput(format!(
                "duplicate {} point '{}'",
                side, id
            )));
        }
    }
    Ok(index)
}
