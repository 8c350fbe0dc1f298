//! Routing engines.
//!
//! [`StandardRoutingEngine`] resolves one independently-sharded table family;
//! [`CartesianRoutingEngine`] combines several unbound families that appear
//! together in one statement. Both are pure: safe to invoke concurrently for
//! independent statements without coordination.

mod cartesian;
mod standard;

pub use cartesian::CartesianRoutingEngine;
pub use standard::StandardRoutingEngine;
