//! Data model for transportation planning.
//!
//! This module provides:
//! - Supply and demand points
//! - Unit cost tables
//! - The validated [`TransportProblem`]
//! - The derived [`ShipmentPlan`]

mod cost;
mod plan;
mod point;
mod problem;

pub use cost::{CostEntry, CostMatrix};
pub use plan::{PlanDuals, Shipment, ShipmentPlan};
pub use point::{DemandPoint, SupplyPoint};
pub use problem::TransportProblem;
