//! Sharding routing resolver for Quilt.
//!
//! This crate turns decomposed sharding values into the physical locations a
//! statement must touch:
//!
//! - [`algorithm`]: capability-tagged sharding algorithms (standard, complex,
//!   hint) plus built-ins
//! - [`ShardingStrategy`]: one algorithm plus its declared sharding columns,
//!   with a single dispatch point
//! - [`TableRule`] / [`ShardingRules`]: per-family configuration and the
//!   explicit registry handed in at startup
//! - [`engine`]: the standard (single-family) and cartesian (multi-family)
//!   routing engines

pub mod algorithm;
pub mod engine;

mod rule;
mod strategy;

pub use algorithm::{
    ComplexShardingAlgorithm, HintShardingAlgorithm, ModShardingAlgorithm, ShardingAlgorithm,
    StandardShardingAlgorithm,
};
pub use engine::{CartesianRoutingEngine, StandardRoutingEngine};
pub use rule::{ShardingRules, TableRule};
pub use strategy::ShardingStrategy;
