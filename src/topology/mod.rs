//! Topology model and proxy plan derivation
//!
//! The types here are plain values produced by discovery; the planner turns
//! them into an ordered, collision-free proxy plan without any I/O.

mod planner;
mod types;

pub use planner::{build_plan, ProxyPlan, ProxyRule, BASE_REDIS_DP_PORT, DP_PORT_STRIDE};
pub use types::{ControlPlaneTopology, DataPlaneTopology, ServiceEndpoint};
