//! Proxy plan derivation
//!
//! Pure and deterministic: the same discovered topology always yields the
//! same ordered plan. Control-plane roles get fixed listen ports; data-plane
//! redis proxies get a strided block per plane index. The 1000-port stride
//! leaves room for up to 1000 ports per plane before the next block starts.

use crate::error::{AppError, AppResult};
use crate::topology::types::{ControlPlaneTopology, DataPlaneTopology, ServiceEndpoint};

/// First listen port for data-plane redis proxies (index 0).
pub const BASE_REDIS_DP_PORT: u16 = 7379;

/// Port distance between consecutive data-plane blocks.
pub const DP_PORT_STRIDE: u16 = 1000;

/// One fault-injection intercept point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    /// Unique within a plan.
    pub name: String,
    /// Listen port on all interfaces; unique within a plan.
    pub listen_port: u16,
    /// `name.namespace.svc:port` of the proxied service.
    pub upstream: String,
    /// Always true at creation; kept for future toggling.
    pub enabled: bool,
}

impl ProxyRule {
    fn new(name: impl Into<String>, listen_port: u16, upstream: &ServiceEndpoint) -> Self {
        Self {
            name: name.into(),
            listen_port,
            upstream: upstream.address(),
            enabled: true,
        }
    }

    /// All-interfaces listen address, `[::]:{port}`.
    pub fn listen(&self) -> String {
        format!("[::]:{}", self.listen_port)
    }
}

/// Ordered proxy rules: control-plane roles in priority order, then data
/// planes by ascending index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyPlan {
    pub rules: Vec<ProxyRule>,
}

impl ProxyPlan {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `(name, listen_port)` pairs for Service exposure.
    pub fn port_mappings(&self) -> Vec<(String, u16)> {
        self.rules
            .iter()
            .map(|r| (r.name.clone(), r.listen_port))
            .collect()
    }
}

/// Derive the full proxy plan from a discovered topology.
///
/// Fails with `PlanInvariant` if the allocation would produce duplicate
/// names or listen ports. That happens when two data-plane namespaces carry
/// the same index, typically because both failed suffix extraction and fell
/// back to 0; there is no tie-break policy, the run aborts instead.
pub fn build_plan(
    cp: &ControlPlaneTopology,
    data_planes: &[DataPlaneTopology],
) -> AppResult<ProxyPlan> {
    let mut rules = Vec::new();

    let cp_roles: [(&str, u16, Option<&ServiceEndpoint>); 5] = [
        ("dashboard", 3000, cp.dashboard.as_ref()),
        ("cp-gateway", 8080, cp.gateway.as_ref()),
        ("mdcb", 9091, cp.mdcb.as_ref()),
        ("redis-cp", 6379, cp.redis.as_ref()),
        ("mongo", 27017, cp.mongo.as_ref()),
    ];

    for (name, port, endpoint) in cp_roles {
        if let Some(ep) = endpoint {
            rules.push(ProxyRule::new(name, port, ep));
        }
    }

    for dp in data_planes {
        if let Some(redis) = &dp.redis {
            let port = BASE_REDIS_DP_PORT as u32 + dp.index * DP_PORT_STRIDE as u32;
            let port = u16::try_from(port).map_err(|_| {
                AppError::PlanInvariant(format!(
                    "data plane index {} overflows the listen port range",
                    dp.index
                ))
            })?;
            rules.push(ProxyRule::new(format!("redis-dp-{}", dp.index), port, redis));
        }
    }

    validate(&rules)?;
    Ok(ProxyPlan { rules })
}

fn validate(rules: &[ProxyRule]) -> AppResult<()> {
    for (i, rule) in rules.iter().enumerate() {
        for other in &rules[..i] {
            if other.name == rule.name {
                return Err(AppError::PlanInvariant(format!(
                    "duplicate proxy name '{}'",
                    rule.name
                )));
            }
            if other.listen_port == rule.listen_port {
                return Err(AppError::PlanInvariant(format!(
                    "proxies '{}' and '{}' both listen on port {}",
                    other.name, rule.name, rule.listen_port
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::types::ServiceEndpoint;

    fn endpoint(name: &str, ns: &str, port: u16) -> ServiceEndpoint {
        ServiceEndpoint::new(name, ns, port)
    }

    #[test]
    fn test_listen_address_form() {
        let rule = ProxyRule::new("redis-cp", 6379, &endpoint("redis", "tyk", 6379));
        assert_eq!(rule.listen(), "[::]:6379");
        assert!(rule.enabled);
    }

    #[test]
    fn test_empty_topology_empty_plan() {
        let cp = ControlPlaneTopology::new("tyk");
        let plan = build_plan(&cp, &[]).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_data_plane_port_stride() {
        let cp = ControlPlaneTopology::new("tyk");
        let mut dp = DataPlaneTopology::new("tyk-dp-3", 3);
        dp.redis = Some(endpoint("redis", "tyk-dp-3", 6379));

        let plan = build_plan(&cp, &[dp]).unwrap();
        assert_eq!(plan.rules[0].name, "redis-dp-3");
        assert_eq!(plan.rules[0].listen_port, 10379);
    }
}
