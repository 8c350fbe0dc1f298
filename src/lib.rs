//! Quilt - distributed database middleware core
//!
//! Quilt presents many physically sharded databases and tables as one
//! logical database. This crate carries the two hard parts: the sharding
//! routing resolver (per-table strategy dispatch plus multi-table cartesian
//! combination) and the parallel execution kernel that runs the resolved
//! per-shard statements and aggregates their outputs.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export core crates
pub use common_config as config;
pub use common_error as error;
pub use common_runtime as runtime;
pub use quilt_core as core;
pub use quilt_execute as execute;
pub use quilt_route as route;

/// Quilt version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
