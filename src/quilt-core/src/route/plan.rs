//! The routing value handed to the rewrite engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::NameSet;

use super::{CartesianRoutingResult, RoutingResult};

/// Either shape of a resolved route.
///
/// Simple when the statement touches one table family; cartesian when
/// several unbound families appear together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoutePlan {
    /// One independently-sharded family.
    Simple(RoutingResult),
    /// Several unbound families combined per data source.
    Cartesian(CartesianRoutingResult),
}

impl RoutePlan {
    /// True iff the statement is effectively unsharded — upstream uses this
    /// for fast-path and caching decisions.
    pub fn is_single_routing(&self) -> bool {
        match self {
            Self::Simple(result) => result.is_single_routing(),
            Self::Cartesian(result) => result.is_single_routing(),
        }
    }

    /// Data sources the statement must touch.
    pub fn data_source_names(&self) -> NameSet {
        match self {
            Self::Simple(result) => result.data_source_names(),
            Self::Cartesian(result) => result.data_source_names(),
        }
    }

    /// Check if nothing was routed.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Simple(result) => result.is_empty(),
            Self::Cartesian(result) => result.is_empty(),
        }
    }
}

impl From<RoutingResult> for RoutePlan {
    fn from(result: RoutingResult) -> Self {
        Self::Simple(result)
    }
}

impl From<CartesianRoutingResult> for RoutePlan {
    fn from(result: CartesianRoutingResult) -> Self {
        Self::Cartesian(result)
    }
}

impl fmt::Display for RoutePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(result) => write!(f, "Simple[{result}]"),
            Self::Cartesian(result) => write!(f, "Cartesian[{result}]"),
        }
    }
}
