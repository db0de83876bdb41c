//! Supply and demand points.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A source location, such as a distribution center, with a finite stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SupplyPoint {
    /// Identifier, unique among supply points.
    pub id: String,
    /// Units available to ship.
    pub available: u64,
}

impl SupplyPoint {
    /// Create a supply point.
    pub fn new(id: impl Into<String>, available: u64) -> Self {
        Self {
            id: id.into(),
            available,
        }
    }
}

/// A destination location, such as a store, that must receive an exact quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DemandPoint {
    /// Identifier, unique among demand points.
    pub id: String,
    /// Units required.
    pub required: u64,
}

impl DemandPoint {
    /// Create a demand point.
    pub fn new(id: impl Into<String>, required: u64) -> Self {
        Self {
            id: id.into(),
            required,
        }
    }
}
