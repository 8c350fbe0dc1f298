//! Cartesian routing: combining unbound table families.

use log::debug;

use common_error::{QuiltError, QuiltResult};
use quilt_core::{CartesianRoutingResult, CartesianTableReference, NameSet, RoutingResult, TableUnit};

/// Combines the simple routing results of two or more table families that
/// co-occur in one statement without being bound to shard identically.
///
/// The output holds every valid combination: complexity is intentionally the
/// full product of per-family group sizes at each data source. The caller's
/// mitigation is declaring the families bound and skipping this engine, not
/// a shortcut here.
#[derive(Debug)]
pub struct CartesianRoutingEngine<'a> {
    routing_results: &'a [RoutingResult],
}

impl<'a> CartesianRoutingEngine<'a> {
    /// Create an engine over the per-family simple results.
    pub fn new(routing_results: &'a [RoutingResult]) -> Self {
        Self { routing_results }
    }

    /// Combine the families into one cartesian result.
    ///
    /// A data source survives only if every family has at least one unit
    /// there; otherwise the statement would silently miss rows for the
    /// absent family.
    pub fn route(&self) -> QuiltResult<CartesianRoutingResult> {
        let mut combined = CartesianRoutingResult::new();
        for data_source in self.intersection_data_sources().iter() {
            let references = self.cartesian_references(data_source)?;
            combined.merge(data_source, references);
        }
        debug!(
            "cartesian routing combined {} families into {} reference(s) across {} data source(s)",
            self.routing_results.len(),
            combined.reference_count(),
            combined.data_source_names().len()
        );
        Ok(combined)
    }

    /// Data sources present in every input result.
    fn intersection_data_sources(&self) -> NameSet {
        let mut results = self.routing_results.iter();
        let Some(first) = results.next() else {
            return NameSet::new();
        };
        results.fold(first.data_source_names(), |acc, result| {
            acc.intersection(&result.data_source_names())
        })
    }

    /// Every combination of one actual table per family at one data source.
    fn cartesian_references(
        &self,
        data_source: &str,
    ) -> QuiltResult<Vec<CartesianTableReference>> {
        let table_groups: Vec<Vec<String>> = self
            .routing_results
            .iter()
            .map(|result| {
                result
                    .actual_table_names(data_source)
                    .iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        cartesian_product(&table_groups)
            .into_iter()
            .map(|tables| self.resolve_reference(data_source, &tables))
            .collect()
    }

    /// Resolve actual table names back to their concrete units.
    fn resolve_reference(
        &self,
        data_source: &str,
        actual_tables: &[String],
    ) -> QuiltResult<CartesianTableReference> {
        let units = actual_tables
            .iter()
            .map(|table| self.resolve_table_unit(data_source, table))
            .collect::<QuiltResult<Vec<_>>>()?;
        Ok(CartesianTableReference::new(units))
    }

    fn resolve_table_unit(&self, data_source: &str, actual_table: &str) -> QuiltResult<TableUnit> {
        self.routing_results
            .iter()
            .find_map(|result| result.table_unit(data_source, actual_table))
            .cloned()
            .ok_or_else(|| {
                QuiltError::route_inconsistency(format!(
                    "no table unit resolves '{data_source}.{actual_table}'; routing index and metadata disagree"
                ))
            })
    }
}

/// Standard set product: one element picked from each group per output tuple.
fn cartesian_product(groups: &[Vec<String>]) -> Vec<Vec<String>> {
    groups.iter().fold(vec![Vec::new()], |tuples, group| {
        tuples
            .iter()
            .flat_map(|tuple| {
                group.iter().map(move |name| {
                    let mut extended = tuple.clone();
                    extended.push(name.clone());
                    extended
                })
            })
            .collect()
    })
}
