//! Built-in modulo sharding algorithm.

use common_error::{QuiltError, QuiltResult};
use quilt_core::{NameSet, ShardingValue, Value};

use super::StandardShardingAlgorithm;

/// Routes `Int64` sharding values by `value % target_count` over the
/// deterministic target order.
///
/// With the common naming convention of numbered targets (`t_order_0`,
/// `t_order_1`, ...) the folded target order lines the index up with the
/// table suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModShardingAlgorithm;

impl ModShardingAlgorithm {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self
    }

    fn shard_index(value: &Value, targets: usize) -> QuiltResult<usize> {
        if targets == 0 {
            return Err(QuiltError::invalid_parameter(
                "mod sharding over an empty target set",
            ));
        }
        let int = value.as_int64().ok_or_else(|| {
            QuiltError::invalid_parameter(format!(
                "mod sharding requires an Int64 value, got {}",
                value.type_name()
            ))
        })?;
        Ok(int.rem_euclid(targets as i64) as usize)
    }

    fn target_at(available: &NameSet, index: usize) -> String {
        // index < available.len() by construction
        available
            .iter()
            .nth(index)
            .map(str::to_string)
            .unwrap_or_default()
    }
}

impl StandardShardingAlgorithm for ModShardingAlgorithm {
    fn do_equal_sharding(&self, available: &NameSet, value: &ShardingValue) -> QuiltResult<String> {
        let index = Self::shard_index(value.single_value()?, available.len())?;
        Ok(Self::target_at(available, index))
    }

    fn do_in_sharding(&self, available: &NameSet, value: &ShardingValue) -> QuiltResult<NameSet> {
        let mut result = NameSet::new();
        for literal in value.values() {
            let index = Self::shard_index(literal, available.len())?;
            result.insert(Self::target_at(available, index));
        }
        Ok(result)
    }

    fn do_between_sharding(
        &self,
        available: &NameSet,
        value: &ShardingValue,
    ) -> QuiltResult<NameSet> {
        let (lower, upper) = value.range()?;
        let lower = lower.as_int64().ok_or_else(|| {
            QuiltError::invalid_parameter("mod sharding requires an Int64 range")
        })?;
        let upper = upper.as_int64().ok_or_else(|| {
            QuiltError::invalid_parameter("mod sharding requires an Int64 range")
        })?;

        let mut result = NameSet::new();
        if lower > upper {
            return Ok(result);
        }
        // A range at least as wide as the target count covers everything.
        if upper - lower + 1 >= available.len() as i64 {
            return Ok(available.iter().collect());
        }
        for literal in lower..=upper {
            let index = Self::shard_index(&Value::Int64(literal), available.len())?;
            result.insert(Self::target_at(available, index));
        }
        Ok(result)
    }
}
