//! Minimum-cost transportation planning.
//!
//! [`formulate`] turns a [`TransportProblem`](crate::model::TransportProblem)
//! into a linear program and [`TransportPlanner`] solves it and reads back a
//! [`ShipmentPlan`](crate::model::ShipmentPlan).

mod formulation;
mod planner;

pub use formulation::{demand_row, formulate, supply_row, variable_index};
pub use planner::{solve, PlannerConfig, TransportPlanner};
