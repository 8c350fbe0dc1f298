//! Physical location descriptors.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use common_error::{invalid_parameter_err, QuiltResult};

/// Delimiter between data source and table in the dotted text form.
const DELIMITER: char = '.';

/// A physical (data source, table) location. Immutable value type.
///
/// Identity is case-insensitive on both components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataNode {
    data_source_name: String,
    table_name: String,
}

impl DataNode {
    /// Create from components.
    pub fn new(data_source_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            data_source_name: data_source_name.into(),
            table_name: table_name.into(),
        }
    }

    /// Parse the dotted `"data_source.table"` form.
    pub fn from_text(text: &str) -> QuiltResult<Self> {
        match text.split_once(DELIMITER) {
            Some((data_source, table)) if !data_source.is_empty() && !table.is_empty() => {
                Ok(Self::new(data_source, table))
            }
            _ => invalid_parameter_err!("invalid data node '{text}', expected 'data_source.table'"),
        }
    }

    /// Data source component.
    pub fn data_source_name(&self) -> &str {
        &self.data_source_name
    }

    /// Table component.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl PartialEq for DataNode {
    fn eq(&self, other: &Self) -> bool {
        self.data_source_name
            .eq_ignore_ascii_case(&other.data_source_name)
            && self.table_name.eq_ignore_ascii_case(&other.table_name)
    }
}

impl Eq for DataNode {}

impl Hash for DataNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data_source_name.to_lowercase().hash(state);
        self.table_name.to_lowercase().hash(state);
    }
}

impl fmt::Display for DataNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.data_source_name, DELIMITER, self.table_name)
    }
}
