//! Unit transport costs between supply and demand points.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::point::{DemandPoint, SupplyPoint};
use crate::error::{PlanError, Result};

/// One `(supply, demand) -> unit cost` entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostEntry {
    /// Supply point identifier.
    pub from: String,
    /// Demand point identifier.
    pub to: String,
    /// Cost per unit shipped.
    pub unit_cost: f64,
}

/// Mapping from `(supply id, demand id)` to per-unit transport cost.
///
/// Entries are not checked here; [`TransportProblem::new`](super::TransportProblem::new)
/// rejects unknown identifiers, missing routes and negative or non-finite costs.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<CostEntry>", into = "Vec<CostEntry>"))]
pub struct CostMatrix {
    entries: BTreeMap<(String, String), f64>,
}

impl CostMatrix {
    /// Create an empty cost matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a dense grid with one row per supply point and one column per demand point.
    pub fn from_grid(
        supply: &[SupplyPoint],
        demand: &[DemandPoint],
        grid: &[Vec<f64>],
    ) -> Result<Self> {
        if grid.len() != supply.len() {
            return Err(PlanError::InvalidInput(format!(
                "cost grid has {} rows but there are {} supply points",
                grid.len(),
                supply.len()
            )));
        }

        let mut costs = Self::new();
        for (s, row) in supply.iter().zip(grid) {
            if row.len() != demand.len() {
                return Err(PlanError::InvalidInput(format!(
                    "cost grid row for '{}' has {} columns but there are {} demand points",
                    s.id,
                    row.len(),
                    demand.len()
                )));
            }
            for (d, &unit_cost) in demand.iter().zip(row) {
                costs.insert(s.id.clone(), d.id.clone(), unit_cost);
            }
        }
        Ok(costs)
    }

    /// Set the unit cost of a route, replacing any previous value.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, unit_cost: f64) {
        self.entries.insert((from.into(), to.into()), unit_cost);
    }

    /// Builder: set the unit cost of a route.
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>, unit_cost: f64) -> Self {
        self.insert(from, to, unit_cost);
        self
    }

    /// Get the unit cost of a route.
    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        self.entries
            .get(&(from.to_string(), to.to_string()))
            .copied()
    }

    /// Number of routes with a cost.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no route has a cost.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in `(from, to)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.entries
            .iter()
            .map(|((from, to), cost)| (from.as_str(), to.as_str(), *cost))
    }
}

impl FromIterator<CostEntry> for CostMatrix {
    fn from_iter<I: IntoIterator<Item = CostEntry>>(iter: I) -> Self {
        let mut costs = Self::new();
        for e in iter {
            costs.insert(e.from, e.to, e.unit_cost);
        }
        costs
    }
}

impl From<Vec<CostEntry>> for CostMatrix {
    fn from(entries: Vec<CostEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<CostMatrix> for Vec<CostEntry> {
    fn from(costs: CostMatrix) -> Self {
        costs
            .entries
            .into_iter()
            .map(|((from, to), unit_cost)| CostEntry {
                from,
                to,
                unit_cost,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_grid() {
        let supply = vec![SupplyPoint::new("CD_1", 10), SupplyPoint::new("CD_2", 10)];
        let demand = vec![DemandPoint::new("A", 5), DemandPoint::new("B", 5)];
        let costs = CostMatrix::from_grid(&supply, &demand, &[vec![1.0, 2.0], vec![3.0, 4.0]])
            .expect("grid");
        assert_eq!(costs.len(), 4);
        assert_eq!(costs.get("CD_2", "A"), Some(3.0));
        assert_eq!(costs.get("CD_1", "B"), Some(2.0));
        assert_eq!(costs.get("CD_3", "B"), None);
    }

    #[test]
    fn test_from_grid_rejects_wrong_row_count() {
        let supply = vec![SupplyPoint::new("CD_1", 10)];
        let demand = vec![DemandPoint::new("A", 5)];
        let err = CostMatrix::from_grid(&supply, &demand, &[vec![1.0], vec![2.0]]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_grid_rejects_wrong_column_count() {
        let supply = vec![SupplyPoint::new("CD_1", 10)];
        let demand = vec![DemandPoint::new("A", 5), DemandPoint::new("B", 5)];
        let err = CostMatrix::from_grid(&supply, &demand, &[vec![1.0]]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_insert_replaces() {
        let costs = CostMatrix::new().with("CD_1", "A", 5.0).with("CD_1", "A", 7.0);
        assert_eq!(costs.len(), 1);
        assert_eq!(costs.get("CD_1", "A"), Some(7.0));
    }

    #[test]
    fn test_entries_round_trip() {
        let costs = CostMatrix::new().with("CD_1", "B", 3.0).with("CD_1", "A", 5.0);
        let entries: Vec<CostEntry> = costs.clone().into();
        assert_eq!(entries[0].to, "A");
        assert_eq!(CostMatrix::from(entries), costs);
    }
}
