//! Sharding values: the per-column predicate fragments the statement binder
//! extracts for the routing resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

use common_error::{QuiltError, QuiltResult};

use crate::types::Value;

/// Predicate operator a sharding value was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShardingOperator {
    /// `column = literal`
    Equal,
    /// `column IN (literal, ...)`
    In,
    /// `column BETWEEN lower AND upper`
    Between,
}

impl fmt::Display for ShardingOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::In => write!(f, "IN"),
            Self::Between => write!(f, "BETWEEN"),
        }
    }
}

/// A decomposed predicate: column, operator, and literal(s).
///
/// Statement-scoped: created fresh by the binder for each statement and
/// discarded once routing consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardingValue {
    column: String,
    operator: ShardingOperator,
    values: Vec<Value>,
}

impl ShardingValue {
    /// Build from an equality predicate.
    pub fn equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator: ShardingOperator::Equal,
            values: vec![value.into()],
        }
    }

    /// Build from an IN list.
    pub fn in_list<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: ShardingOperator::In,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from a BETWEEN range (both bounds inclusive).
    pub fn between(
        column: impl Into<String>,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: ShardingOperator::Between,
            values: vec![lower.into(), upper.into()],
        }
    }

    /// Column this value constrains.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Operator the value was extracted from.
    pub fn operator(&self) -> ShardingOperator {
        self.operator
    }

    /// All literals carried by this value.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The single literal of an equality value.
    pub fn single_value(&self) -> QuiltResult<&Value> {
        self.values.first().ok_or_else(|| {
            QuiltError::invalid_parameter(format!(
                "sharding value for column '{}' carries no literal",
                self.column
            ))
        })
    }

    /// The inclusive (lower, upper) bounds of a BETWEEN value.
    pub fn range(&self) -> QuiltResult<(&Value, &Value)> {
        match (self.operator, self.values.as_slice()) {
            (ShardingOperator::Between, [lower, upper]) => Ok((lower, upper)),
            _ => Err(QuiltError::invalid_parameter(format!(
                "sharding value for column '{}' is not a range",
                self.column
            ))),
        }
    }

    /// Whether this value constrains the given column, ignoring case.
    pub fn matches_column(&self, column: &str) -> bool {
        self.column.eq_ignore_ascii_case(column)
    }
}

impl fmt::Display for ShardingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.column, self.operator)?;
        match self.operator {
            ShardingOperator::Between => {
                write!(f, "{} AND {}", self.values[0], self.values[1])
            }
            _ => {
                write!(f, "(")?;
                for (i, value) in self.values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
        }
    }
}
