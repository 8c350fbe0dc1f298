//! Routed table units.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::DataNode;

/// One routed physical table together with the logical table it stands for.
///
/// Identity is the (data source, actual table) pair, case-insensitive; the
/// originating logical name is carried for the rewrite engine but does not
/// participate in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableUnit {
    logic_table_name: String,
    data_node: DataNode,
}

impl TableUnit {
    /// Create from a logical table name and its routed physical location.
    pub fn new(
        logic_table_name: impl Into<String>,
        data_source_name: impl Into<String>,
        actual_table_name: impl Into<String>,
    ) -> Self {
        Self {
            logic_table_name: logic_table_name.into(),
            data_node: DataNode::new(data_source_name, actual_table_name),
        }
    }

    /// Logical table this unit was routed from.
    pub fn logic_table_name(&self) -> &str {
        &self.logic_table_name
    }

    /// Data source holding the physical table.
    pub fn data_source_name(&self) -> &str {
        self.data_node.data_source_name()
    }

    /// Physical table name.
    pub fn actual_table_name(&self) -> &str {
        self.data_node.table_name()
    }

    /// The physical location.
    pub fn data_node(&self) -> &DataNode {
        &self.data_node
    }

    /// Whether this unit sits at the given location, ignoring case.
    pub fn is_at(&self, data_source_name: &str, actual_table_name: &str) -> bool {
        self.data_source_name().eq_ignore_ascii_case(data_source_name)
            && self.actual_table_name().eq_ignore_ascii_case(actual_table_name)
    }
}

impl PartialEq for TableUnit {
    fn eq(&self, other: &Self) -> bool {
        self.data_node == other.data_node
    }
}

impl Eq for TableUnit {}

impl Hash for TableUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data_node.hash(state);
    }
}

impl fmt::Display for TableUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.logic_table_name, self.data_node)
    }
}
