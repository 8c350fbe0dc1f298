//! Decomposed statement predicates used as sharding input.

mod sharding_value;

pub use sharding_value::{ShardingOperator, ShardingValue};
