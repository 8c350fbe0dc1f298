//! Sharding strategies: one algorithm plus its declared sharding columns.

use std::sync::Arc;

use common_error::{QuiltError, QuiltResult};
use quilt_core::{NameSet, ShardingOperator, ShardingValue};

use crate::algorithm::{
    ComplexShardingAlgorithm, HintShardingAlgorithm, ShardingAlgorithm, StandardShardingAlgorithm,
};

/// A table family's sharding strategy.
///
/// Owns a case-insensitive ordered set of sharding column names and shares
/// one capability-tagged algorithm. [`do_sharding`](Self::do_sharding) is the
/// single dispatch point over the capability tag.
#[derive(Debug, Clone)]
pub struct ShardingStrategy {
    columns: NameSet,
    algorithm: ShardingAlgorithm,
}

impl ShardingStrategy {
    /// Strategy over a single-key algorithm and its one sharding column.
    pub fn standard(
        column: impl Into<String>,
        algorithm: Arc<dyn StandardShardingAlgorithm>,
    ) -> Self {
        Self {
            columns: [column.into()].into_iter().collect(),
            algorithm: ShardingAlgorithm::Standard(algorithm),
        }
    }

    /// Strategy over a multi-key algorithm and its sharding columns.
    pub fn complex<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        algorithm: Arc<dyn ComplexShardingAlgorithm>,
    ) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            algorithm: ShardingAlgorithm::Complex(algorithm),
        }
    }

    /// Strategy over a hint algorithm. Hint routing is driven by an
    /// externally-supplied value, so no sharding columns are declared.
    pub fn hint(algorithm: Arc<dyn HintShardingAlgorithm>) -> Self {
        Self {
            columns: NameSet::new(),
            algorithm: ShardingAlgorithm::Hint(algorithm),
        }
    }

    /// Declared sharding columns (case-insensitive, ordered).
    pub fn columns(&self) -> &NameSet {
        &self.columns
    }

    /// Capability tag of the owned algorithm.
    pub fn algorithm_kind(&self) -> &'static str {
        self.algorithm.kind()
    }

    /// The subset of `values` this strategy consumes.
    ///
    /// Column-driven strategies keep values for their declared columns; hint
    /// strategies consume externally-supplied values regardless of column.
    pub fn relevant_values(&self, values: &[ShardingValue]) -> Vec<ShardingValue> {
        match self.algorithm {
            ShardingAlgorithm::Hint(_) => values.to_vec(),
            _ => values
                .iter()
                .filter(|value| self.columns.contains(value.column()))
                .cloned()
                .collect(),
        }
    }

    /// Resolve sharding values to target names within `available`.
    ///
    /// Returns a normalized, case-insensitive ordered set, so repeated calls
    /// with identical input yield identical, comparable output.
    pub fn do_sharding(
        &self,
        available: &NameSet,
        values: &[ShardingValue],
    ) -> QuiltResult<NameSet> {
        let routed = match &self.algorithm {
            ShardingAlgorithm::Hint(algorithm) => {
                // Exactly the first supplied value is consumed; extras are
                // accepted but ignored by contract.
                let first = values.first().ok_or_else(|| {
                    QuiltError::unsupported_algorithm(
                        "hint algorithm requires an externally-supplied sharding value",
                    )
                })?;
                algorithm.do_sharding(available, first)?
            }
            ShardingAlgorithm::Complex(algorithm) => algorithm.do_sharding(available, values)?,
            ShardingAlgorithm::Standard(algorithm) => {
                self.do_standard_sharding(algorithm.as_ref(), available, values)?
            }
        };
        Self::validated(available, routed)
    }

    fn do_standard_sharding(
        &self,
        algorithm: &dyn StandardShardingAlgorithm,
        available: &NameSet,
        values: &[ShardingValue],
    ) -> QuiltResult<NameSet> {
        if values.is_empty() {
            return Err(QuiltError::unsupported_algorithm(
                "standard algorithm requires at least one sharding value",
            ));
        }
        let mut result = NameSet::new();
        for value in values {
            if !self.columns.contains(value.column()) {
                return Err(QuiltError::unsupported_algorithm(format!(
                    "standard algorithm cannot dispatch value for column '{}', declared sharding column is {}",
                    value.column(),
                    self.columns
                )));
            }
            match value.operator() {
                ShardingOperator::Equal => {
                    result.insert(algorithm.do_equal_sharding(available, value)?);
                }
                ShardingOperator::In => {
                    for name in algorithm.do_in_sharding(available, value)?.iter() {
                        result.insert(name);
                    }
                }
                ShardingOperator::Between => {
                    for name in algorithm.do_between_sharding(available, value)?.iter() {
                        result.insert(name);
                    }
                }
            }
        }
        Ok(result)
    }

    /// Re-materialize routed names with the available set's casing, failing
    /// on any name the algorithm invented.
    fn validated(available: &NameSet, routed: NameSet) -> QuiltResult<NameSet> {
        let mut normalized = NameSet::new();
        for name in routed.iter() {
            let stored = available.get(name).ok_or_else(|| {
                QuiltError::route_inconsistency(format!(
                    "algorithm returned target '{name}' outside the available set {available}"
                ))
            })?;
            normalized.insert(stored);
        }
        Ok(normalized)
    }
}
