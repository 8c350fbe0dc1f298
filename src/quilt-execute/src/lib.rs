//! Parallel execution kernel for Quilt.
//!
//! This crate runs the resolved, rewritten per-shard statements and
//! aggregates their outputs for the external merge engine:
//!
//! - [`ExecutionGroup`]: ordered per-shard units bound for one destination
//!   resource
//! - [`ExecutorDataMap`]: explicit cross-thread context propagation
//! - [`GroupExecuteCallback`]: the pluggable per-group callback
//! - [`ExecutorKernel`]: serial or parallel fan-out over a managed worker
//!   pool, with deterministic result ordering and single-error surfacing

mod callback;
mod context;
mod group;
mod kernel;

pub use callback::GroupExecuteCallback;
pub use context::{ContextValue, ExecutorDataMap};
pub use group::ExecutionGroup;
pub use kernel::ExecutorKernel;
