//! Toxiproxy wire records
//!
//! The fleet's populate endpoint takes a JSON array of these. Serialization
//! is explicit here rather than derived from the planner's internal types so
//! the wire shape cannot drift when the plan representation changes.

use serde::{Deserialize, Serialize};

use crate::topology::{ProxyPlan, ProxyRule};

/// One proxy as the fleet API sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRecord {
    pub name: String,
    pub listen: String,
    pub upstream: String,
    pub enabled: bool,
}

impl From<&ProxyRule> for ProxyRecord {
    fn from(rule: &ProxyRule) -> Self {
        Self {
            name: rule.name.clone(),
            listen: rule.listen(),
            upstream: rule.upstream.clone(),
            enabled: rule.enabled,
        }
    }
}

/// Flatten a plan into the populate payload, preserving plan order.
pub fn to_records(plan: &ProxyPlan) -> Vec<ProxyRecord> {
    plan.rules.iter().map(ProxyRecord::from).collect()
}
