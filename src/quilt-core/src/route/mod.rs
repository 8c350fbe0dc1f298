//! Routing result model: which physical locations a statement touches.

mod cartesian;
mod data_node;
mod plan;
mod routing_result;
mod table_unit;

pub use cartesian::{CartesianRoutingResult, CartesianTableReference};
pub use data_node::DataNode;
pub use plan::RoutePlan;
pub use routing_result::RoutingResult;
pub use table_unit::TableUnit;
