//! Table rules and the sharding rule registry.

use std::collections::BTreeMap;

use common_error::{ensure, QuiltError, QuiltResult};
use quilt_core::{DataNode, NameSet};

use crate::strategy::ShardingStrategy;

/// Per-family sharding configuration: the logical table name, its physical
/// data nodes, and the strategies routing each axis.
#[derive(Debug, Clone)]
pub struct TableRule {
    logic_table: String,
    actual_data_nodes: Vec<DataNode>,
    database_strategy: Option<ShardingStrategy>,
    table_strategy: Option<ShardingStrategy>,
}

impl TableRule {
    /// Create a rule from a logical table and its configured data nodes.
    pub fn new(
        logic_table: impl Into<String>,
        actual_data_nodes: Vec<DataNode>,
    ) -> QuiltResult<Self> {
        let logic_table = logic_table.into();
        ensure!(
            !actual_data_nodes.is_empty(),
            ConfigError: "table rule '{logic_table}' declares no actual data nodes"
        );
        Ok(Self {
            logic_table,
            actual_data_nodes,
            database_strategy: None,
            table_strategy: None,
        })
    }

    /// Create a rule from dotted `"ds.table"` node texts.
    pub fn from_texts<S: AsRef<str>>(
        logic_table: impl Into<String>,
        node_texts: impl IntoIterator<Item = S>,
    ) -> QuiltResult<Self> {
        let nodes = node_texts
            .into_iter()
            .map(|text| DataNode::from_text(text.as_ref()))
            .collect::<QuiltResult<Vec<_>>>()?;
        Self::new(logic_table, nodes)
    }

    /// Set the strategy routing the data-source axis.
    pub fn with_database_strategy(mut self, strategy: ShardingStrategy) -> Self {
        self.database_strategy = Some(strategy);
        self
    }

    /// Set the strategy routing the table axis.
    pub fn with_table_strategy(mut self, strategy: ShardingStrategy) -> Self {
        self.table_strategy = Some(strategy);
        self
    }

    /// Logical table name.
    pub fn logic_table(&self) -> &str {
        &self.logic_table
    }

    /// Configured physical locations.
    pub fn actual_data_nodes(&self) -> &[DataNode] {
        &self.actual_data_nodes
    }

    /// Strategy for the data-source axis, if any.
    pub fn database_strategy(&self) -> Option<&ShardingStrategy> {
        self.database_strategy.as_ref()
    }

    /// Strategy for the table axis, if any.
    pub fn table_strategy(&self) -> Option<&ShardingStrategy> {
        self.table_strategy.as_ref()
    }

    /// Distinct data source names among the configured nodes.
    pub fn data_source_names(&self) -> NameSet {
        self.actual_data_nodes
            .iter()
            .map(DataNode::data_source_name)
            .collect()
    }

    /// Distinct table names configured at one data source, ignoring case.
    pub fn table_names_at(&self, data_source_name: &str) -> NameSet {
        self.actual_data_nodes
            .iter()
            .filter(|node| {
                node.data_source_name()
                    .eq_ignore_ascii_case(data_source_name)
            })
            .map(DataNode::table_name)
            .collect()
    }
}

/// The explicit sharding rule registry.
///
/// Constructed once at startup from the metadata layer and threaded through
/// the routing call chain; there is no hidden global.
#[derive(Debug, Clone, Default)]
pub struct ShardingRules {
    // folded logical table name -> rule
    rules: BTreeMap<String, TableRule>,
    binding_groups: Vec<NameSet>,
}

impl ShardingRules {
    /// Build the registry, rejecting duplicate logical table names.
    pub fn new(rules: Vec<TableRule>) -> QuiltResult<Self> {
        let mut index = BTreeMap::new();
        for rule in rules {
            let folded = rule.logic_table().to_lowercase();
            if index.contains_key(&folded) {
                return Err(QuiltError::config(format!(
                    "duplicate table rule for '{}'",
                    rule.logic_table()
                )));
            }
            index.insert(folded, rule);
        }
        Ok(Self {
            rules: index,
            binding_groups: Vec::new(),
        })
    }

    /// Declare a group of table families that always shard identically.
    ///
    /// Statements touching only families of one group can skip cartesian
    /// combination and route off any single member.
    pub fn with_binding_group<S: Into<String>>(
        mut self,
        tables: impl IntoIterator<Item = S>,
    ) -> Self {
        self.binding_groups.push(tables.into_iter().collect());
        self
    }

    /// Look up a rule by logical table name, ignoring case.
    pub fn rule(&self, logic_table: &str) -> Option<&TableRule> {
        self.rules.get(&logic_table.to_lowercase())
    }

    /// Whether all given families belong to one binding group.
    pub fn is_binding(&self, logic_tables: &[&str]) -> bool {
        if logic_tables.len() < 2 {
            return false;
        }
        self.binding_groups
            .iter()
            .any(|group| logic_tables.iter().all(|table| group.contains(table)))
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate rules in deterministic (folded logical name) order.
    pub fn iter(&self) -> impl Iterator<Item = &TableRule> {
        self.rules.values()
    }
}
