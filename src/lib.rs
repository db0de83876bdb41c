//! # transplan
//!
//! Minimum-cost transportation planning in Rust.
//!
//! transplan ships goods from supply points (distribution centers) to demand
//! points (stores) at the lowest total cost. The problem is formulated as a
//! linear program and solved with the Clarabel interior-point solver.
//!
//! ## Quick Start
//!
//! ```ignore
//! use transplan::prelude::*;
//!
//! let supply = [SupplyPoint::new("CD1", 100)];
//! let demand = [DemandPoint::new("A", 60), DemandPoint::new("B", 40)];
//! let costs = CostMatrix::new()
//!     .with("CD1", "A", 5.0)
//!     .with("CD1", "B", 3.0);
//!
//! let plan = TransportPlanner::default().solve(&supply, &demand, &costs)?;
//! println!("Total cost: {}", plan.total_cost()); // 420
//! ```
//!
//! ## Formulation
//!
//! - **Variables**: one non-negative quantity per (supply, demand) route
//! - **Objective**: minimize the sum of unit cost times quantity
//! - **Supply rows**: a center ships at most its stock
//! - **Demand rows**: a store receives exactly its requirement
//!
//! Total supply below total demand is reported as [`PlanError::Infeasible`]
//! before the solver runs.
//!
//! ## Architecture
//!
//! - **model**: supply/demand points, cost tables, validated problems and plans
//! - **lp**: linear programs in standard form
//! - **solver**: matrix stuffing and the Clarabel backend
//! - **transport**: formulation and the planner
//! - **report**: plain-text presentation, kept out of the planner

pub mod error;
pub mod lp;
pub mod model;
pub mod report;
pub mod solver;
pub mod sparse;
pub mod transport;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use transplan::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use crate::model::{
        CostEntry, CostMatrix, DemandPoint, PlanDuals, Shipment, ShipmentPlan, SupplyPoint,
        TransportProblem,
    };

    // Planning
    pub use crate::transport::{PlannerConfig, TransportPlanner};

    // Linear programs
    pub use crate::lp::{LinearConstraint, LinearExpr, LinearProgram};

    // Solver
    pub use crate::solver::{LpSolution, Settings, SolveStatus};

    // Presentation
    pub use crate::report::{PlanReporter, TableReport};

    // Errors
    pub use crate::error::{PlanError, Result};
}

// Re-export main types at crate root
pub use error::{PlanError, Result};
pub use model::{CostMatrix, DemandPoint, ShipmentPlan, SupplyPoint, TransportProblem};
pub use transport::{solve, PlannerConfig, TransportPlanner};
