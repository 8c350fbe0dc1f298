//! Core data model for the Quilt sharding middleware.
//!
//! This crate provides the fundamental types shared by the routing resolver
//! and the execution kernel:
//! - `Value` and `ShardingValue` for decomposed statement predicates
//! - `NameSet` for case-insensitive, deterministically ordered name handling
//! - `DataNode`, `TableUnit`, `RoutingResult` and the cartesian result types
//!   describing which physical locations a statement touches

pub mod condition;
pub mod route;
pub mod types;

mod proptest_utils;

// Re-export commonly used types
pub use condition::{ShardingOperator, ShardingValue};
pub use route::{
    CartesianRoutingResult, CartesianTableReference, DataNode, RoutePlan, RoutingResult, TableUnit,
};
pub use types::{NameSet, Value};
