//! Cartesian routing results: several unbound table families combined.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::NameSet;

use super::TableUnit;

/// An ordered tuple holding exactly one routed unit per participating
/// table family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartesianTableReference {
    table_units: Vec<TableUnit>,
}

impl CartesianTableReference {
    /// Create from one unit per family, in family order.
    pub fn new(table_units: Vec<TableUnit>) -> Self {
        Self { table_units }
    }

    /// The referenced units in family order.
    pub fn table_units(&self) -> &[TableUnit] {
        &self.table_units
    }

    /// Number of participating families.
    pub fn len(&self) -> usize {
        self.table_units.len()
    }

    /// Check if the reference is empty.
    pub fn is_empty(&self) -> bool {
        self.table_units.is_empty()
    }
}

impl fmt::Display for CartesianTableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, unit) in self.table_units.iter().enumerate() {
            if i > 0 {
                write!(f, " x ")?;
            }
            write!(f, "{}", unit.actual_table_name())?;
        }
        write!(f, ")")
    }
}

/// References accumulated for one data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CartesianDataSource {
    data_source_name: String,
    references: Vec<CartesianTableReference>,
}

/// The combined routing of several unbound table families.
///
/// Keyed by data-source name, case-insensitive. Request-scoped: the owning
/// cartesian engine accumulates into it via [`merge`](Self::merge) and hands
/// it to the rewrite engine, after which it is discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianRoutingResult {
    // folded data source name -> accumulated references
    routing: BTreeMap<String, CartesianDataSource>,
}

impl CartesianRoutingResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append references for a data source.
    ///
    /// Additive: merging the same data source twice appends rather than
    /// overwrites.
    pub fn merge(&mut self, data_source_name: &str, references: Vec<CartesianTableReference>) {
        let folded = data_source_name.to_lowercase();
        self.routing
            .entry(folded)
            .or_insert_with(|| CartesianDataSource {
                data_source_name: data_source_name.to_string(),
                references: Vec::new(),
            })
            .references
            .extend(references);
    }

    /// References for one data source, ignoring case.
    pub fn references(&self, data_source_name: &str) -> Option<&[CartesianTableReference]> {
        self.routing
            .get(&data_source_name.to_lowercase())
            .map(|ds| ds.references.as_slice())
    }

    /// Data sources carrying at least one reference.
    pub fn data_source_names(&self) -> NameSet {
        self.routing
            .values()
            .map(|ds| ds.data_source_name.as_str())
            .collect()
    }

    /// Total reference count across all data sources.
    pub fn reference_count(&self) -> usize {
        self.routing.values().map(|ds| ds.references.len()).sum()
    }

    /// True iff the whole statement resolves to a single combination.
    pub fn is_single_routing(&self) -> bool {
        self.reference_count() == 1
    }

    /// Check if no combination survived.
    pub fn is_empty(&self) -> bool {
        self.routing.is_empty()
    }

    /// Iterate (data source, references) in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CartesianTableReference])> {
        self.routing
            .values()
            .map(|ds| (ds.data_source_name.as_str(), ds.references.as_slice()))
    }
}

impl fmt::Display for CartesianRoutingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (data_source, references)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{data_source}: ")?;
            for (j, reference) in references.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{reference}")?;
            }
        }
        Ok(())
    }
}
