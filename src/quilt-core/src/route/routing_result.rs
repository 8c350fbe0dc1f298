//! Simple routing results: one independently-sharded table family.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::NameSet;

use super::TableUnit;

/// The routed locations of one logical table family.
///
/// Construction deduplicates by unit identity and fixes a deterministic
/// (case-folded) order, so routing the same statement twice yields equal,
/// comparable results. The value is immutable once built; it is created
/// fresh per statement and disposed of after rewrite/execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingResult {
    table_units: Vec<TableUnit>,
}

impl RoutingResult {
    /// Build from routed units, deduplicating and ordering them.
    pub fn new(mut table_units: Vec<TableUnit>) -> Self {
        table_units.sort_by(|a, b| {
            let key_a = (
                a.data_source_name().to_lowercase(),
                a.actual_table_name().to_lowercase(),
            );
            let key_b = (
                b.data_source_name().to_lowercase(),
                b.actual_table_name().to_lowercase(),
            );
            key_a.cmp(&key_b)
        });
        table_units.dedup();
        Self { table_units }
    }

    /// An empty result (statement touches nothing).
    pub fn empty() -> Self {
        Self {
            table_units: Vec::new(),
        }
    }

    /// All routed units in deterministic order.
    pub fn table_units(&self) -> &[TableUnit] {
        &self.table_units
    }

    /// Number of routed units.
    pub fn len(&self) -> usize {
        self.table_units.len()
    }

    /// Check if nothing was routed.
    pub fn is_empty(&self) -> bool {
        self.table_units.is_empty()
    }

    /// True iff the statement resolves to exactly one physical table.
    pub fn is_single_routing(&self) -> bool {
        self.table_units.len() == 1
    }

    /// Distinct data source names touched by this result.
    pub fn data_source_names(&self) -> NameSet {
        self.table_units
            .iter()
            .map(TableUnit::data_source_name)
            .collect()
    }

    /// Distinct actual table names at one data source, ignoring case.
    pub fn actual_table_names(&self, data_source_name: &str) -> NameSet {
        self.table_units
            .iter()
            .filter(|unit| {
                unit.data_source_name()
                    .eq_ignore_ascii_case(data_source_name)
            })
            .map(TableUnit::actual_table_name)
            .collect()
    }

    /// Find the unit at a concrete location, ignoring case.
    pub fn table_unit(&self, data_source_name: &str, actual_table_name: &str) -> Option<&TableUnit> {
        self.table_units
            .iter()
            .find(|unit| unit.is_at(data_source_name, actual_table_name))
    }

    /// Units grouped by data source, in deterministic data-source order.
    pub fn group_by_data_source(&self) -> Vec<(&str, Vec<&TableUnit>)> {
        let mut groups: Vec<(&str, Vec<&TableUnit>)> = Vec::new();
        for unit in &self.table_units {
            match groups.last_mut() {
                Some((data_source, units))
                    if data_source.eq_ignore_ascii_case(unit.data_source_name()) =>
                {
                    units.push(unit);
                }
                _ => groups.push((unit.data_source_name(), vec![unit])),
            }
        }
        groups
    }
}

impl fmt::Display for RoutingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, unit) in self.table_units.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", unit.data_node())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoutingResult {
        RoutingResult::new(vec![
            TableUnit::new("t_order", "ds_1", "t_order_1"),
            TableUnit::new("t_order", "ds_0", "t_order_0"),
            TableUnit::new("t_order", "ds_0", "t_order_1"),
            TableUnit::new("t_order", "DS_0", "T_ORDER_0"),
        ])
    }

    #[test]
    fn test_dedup_and_order() {
        let result = sample();
        assert_eq!(result.len(), 3);
        let locations: Vec<String> = result
            .table_units()
            .iter()
            .map(|u| u.data_node().to_string().to_lowercase())
            .collect();
        assert_eq!(
            locations,
            vec!["ds_0.t_order_0", "ds_0.t_order_1", "ds_1.t_order_1"]
        );
    }

    #[test]
    fn test_data_source_names() {
        let names = sample().data_source_names();
        assert_eq!(names.len(), 2);
        assert!(names.contains("DS_1"));
    }

    #[test]
    fn test_actual_table_names_per_source() {
        let result = sample();
        let tables = result.actual_table_names("DS_0");
        assert_eq!(tables.len(), 2);
        assert!(tables.contains("t_order_1"));
        assert!(result.actual_table_names("ds_9").is_empty());
    }

    #[test]
    fn test_table_unit_lookup() {
        let result = sample();
        assert!(result.table_unit("ds_1", "T_ORDER_1").is_some());
        assert!(result.table_unit("ds_1", "t_order_0").is_none());
    }

    #[test]
    fn test_group_by_data_source() {
        let binding = sample();
        let groups = binding.group_by_data_source();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn test_single_routing() {
        assert!(!sample().is_single_routing());
        let single = RoutingResult::new(vec![TableUnit::new("t_order", "ds_0", "t_order_0")]);
        assert!(single.is_single_routing());
        assert!(!RoutingResult::empty().is_single_routing());
    }

    #[test]
    fn test_repeated_routing_is_comparable() {
        assert_eq!(sample(), sample());
    }
}
