//! Standard routing: one independently-sharded table family.

use log::debug;

use common_error::QuiltResult;
use quilt_core::{NameSet, RoutingResult, ShardingValue, TableUnit};

use crate::rule::TableRule;
use crate::strategy::ShardingStrategy;

/// Routes one logical table family through its configured strategies.
///
/// The common case: no combinatorial work. The database strategy narrows the
/// data sources, the table strategy narrows the tables per surviving data
/// source, and both are intersected with the rule's actual data nodes.
#[derive(Debug)]
pub struct StandardRoutingEngine<'a> {
    rule: &'a TableRule,
}

impl<'a> StandardRoutingEngine<'a> {
    /// Create an engine for one table rule.
    pub fn new(rule: &'a TableRule) -> Self {
        Self { rule }
    }

    /// Resolve the family's physical locations for the given sharding values.
    ///
    /// An axis without a strategy, or whose strategy has no relevant values,
    /// routes to everything configured on that axis. An empty intersection
    /// yields an empty result, not an error.
    pub fn route(&self, values: &[ShardingValue]) -> QuiltResult<RoutingResult> {
        let routed_sources = self.route_axis(
            self.rule.database_strategy(),
            &self.rule.data_source_names(),
            values,
        )?;

        let mut units = Vec::new();
        for data_source in routed_sources.iter() {
            let available_tables = self.rule.table_names_at(data_source);
            let routed_tables =
                self.route_axis(self.rule.table_strategy(), &available_tables, values)?;
            for table in routed_tables.iter() {
                units.push(TableUnit::new(self.rule.logic_table(), data_source, table));
            }
        }

        let result = RoutingResult::new(units);
        debug!(
            "standard routing resolved '{}' to {} unit(s)",
            self.rule.logic_table(),
            result.len()
        );
        Ok(result)
    }

    fn route_axis(
        &self,
        strategy: Option<&ShardingStrategy>,
        available: &NameSet,
        values: &[ShardingValue],
    ) -> QuiltResult<NameSet> {
        match strategy {
            Some(strategy) => {
                let relevant = strategy.relevant_values(values);
                if relevant.is_empty() {
                    Ok(available.clone())
                } else {
                    strategy.do_sharding(available, &relevant)
                }
            }
            None => Ok(available.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::algorithm::ModShardingAlgorithm;

    fn sharded_rule() -> TableRule {
        TableRule::from_texts(
            "t_order",
            [
                "ds_0.t_order_0",
                "ds_0.t_order_1",
                "ds_1.t_order_0",
                "ds_1.t_order_1",
            ],
        )
        .unwrap()
        .with_database_strategy(ShardingStrategy::standard(
            "user_id",
            Arc::new(ModShardingAlgorithm::new()),
        ))
        .with_table_strategy(ShardingStrategy::standard(
            "order_id",
            Arc::new(ModShardingAlgorithm::new()),
        ))
    }

    #[test]
    fn test_route_with_both_values() {
        let rule = sharded_rule();
        let values = vec![
            ShardingValue::equal("user_id", 1i64),
            ShardingValue::equal("order_id", 1i64),
        ];
        let result = StandardRoutingEngine::new(&rule).route(&values).unwrap();

        assert!(result.is_single_routing());
        let unit = &result.table_units()[0];
        assert_eq!(unit.data_source_name(), "ds_1");
        assert_eq!(unit.actual_table_name(), "t_order_1");
        assert_eq!(unit.logic_table_name(), "t_order");
    }

    #[test]
    fn test_route_without_values_fans_out() {
        let rule = sharded_rule();
        let result = StandardRoutingEngine::new(&rule).route(&[]).unwrap();
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_route_with_database_value_only() {
        let rule = sharded_rule();
        let values = vec![ShardingValue::equal("user_id", 0i64)];
        let result = StandardRoutingEngine::new(&rule).route(&values).unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.data_source_names().contains("ds_0"));
        assert!(!result.data_source_names().contains("ds_1"));
    }

    #[test]
    fn test_route_with_in_values() {
        let rule = sharded_rule();
        let values = vec![
            ShardingValue::equal("user_id", 0i64),
            ShardingValue::in_list("order_id", [0i64, 1]),
        ];
        let result = StandardRoutingEngine::new(&rule).route(&values).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_route_without_strategies_routes_all() {
        let rule =
            TableRule::from_texts("t_user", ["ds_0.t_user", "ds_1.t_user"]).unwrap();
        let values = vec![ShardingValue::equal("user_id", 3i64)];
        let result = StandardRoutingEngine::new(&rule).route(&values).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_repeated_routing_is_deterministic() {
        let rule = sharded_rule();
        let values = vec![ShardingValue::in_list("order_id", [0i64, 1])];
        let first = StandardRoutingEngine::new(&rule).route(&values).unwrap();
        let second = StandardRoutingEngine::new(&rule).route(&values).unwrap();
        assert_eq!(first, second);
    }
}
