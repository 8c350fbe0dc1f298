//! Sharding algorithms.
//!
//! An algorithm maps sharding value(s) onto target names drawn from a given
//! set of available targets. Algorithms are pure and stateless: no I/O, no
//! mutation, deterministic for identical inputs. They are user-pluggable and
//! shared via `Arc`, so one instance may serve many strategies and
//! statements concurrently.
//!
//! Three capability variants exist, carried by [`ShardingAlgorithm`] — a
//! tagged union with one trait per capability. The strategy dispatches on
//! the tag in a single match; there is no runtime type inspection.

mod mod_sharding;

use std::fmt;
use std::sync::Arc;

use common_error::QuiltResult;
use quilt_core::{NameSet, ShardingValue};

pub use mod_sharding::ModShardingAlgorithm;

/// Single-key algorithm: reasons about one column, one operator at a time.
pub trait StandardShardingAlgorithm: Send + Sync {
    /// Route an equality value to exactly one target.
    fn do_equal_sharding(&self, available: &NameSet, value: &ShardingValue) -> QuiltResult<String>;

    /// Route an IN list to the matching targets.
    fn do_in_sharding(&self, available: &NameSet, value: &ShardingValue) -> QuiltResult<NameSet>;

    /// Route a BETWEEN range to the matching targets.
    fn do_between_sharding(
        &self,
        available: &NameSet,
        value: &ShardingValue,
    ) -> QuiltResult<NameSet>;
}

/// Multi-key ("complex") algorithm: receives all relevant column values at
/// once, for algorithms that must reason jointly over several columns.
pub trait ComplexShardingAlgorithm: Send + Sync {
    /// Route the full value collection to the matching targets.
    fn do_sharding(&self, available: &NameSet, values: &[ShardingValue]) -> QuiltResult<NameSet>;
}

/// Hint algorithm: routes by one externally-supplied value, bypassing
/// SQL-derived predicates (session or manual routing override).
pub trait HintShardingAlgorithm: Send + Sync {
    /// Route the hint value to the matching targets.
    fn do_sharding(&self, available: &NameSet, value: &ShardingValue) -> QuiltResult<NameSet>;
}

/// A sharding algorithm tagged by capability.
#[derive(Clone)]
pub enum ShardingAlgorithm {
    /// Single-key capability.
    Standard(Arc<dyn StandardShardingAlgorithm>),
    /// Multi-key capability.
    Complex(Arc<dyn ComplexShardingAlgorithm>),
    /// Hint capability.
    Hint(Arc<dyn HintShardingAlgorithm>),
}

impl ShardingAlgorithm {
    /// Capability tag name, used in dispatch error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Standard(_) => "standard",
            Self::Complex(_) => "complex",
            Self::Hint(_) => "hint",
        }
    }
}

impl fmt::Debug for ShardingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShardingAlgorithm").field(&self.kind()).finish()
    }
}
