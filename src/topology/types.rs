//! Discovered topology value types
//!
//! Everything here is constructed once per run from live cluster state and
//! never mutated afterwards.

use serde::Serialize;

/// A resolved cluster service: one role of one plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEndpoint {
    pub name: String,
    pub namespace: String,
    pub port: u16,
}

impl ServiceEndpoint {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            port,
        }
    }

    /// Cluster-internal DNS name (`name.namespace.svc`).
    pub fn dns_name(&self) -> String {
        format!("{}.{}.svc", self.name, self.namespace)
    }

    /// Upstream address in `name.namespace.svc:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.dns_name(), self.port)
    }
}

/// The shared management tier. A `None` role means "not deployed", not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlPlaneTopology {
    pub namespace: String,
    pub dashboard: Option<ServiceEndpoint>,
    pub gateway: Option<ServiceEndpoint>,
    pub mdcb: Option<ServiceEndpoint>,
    pub redis: Option<ServiceEndpoint>,
    pub mongo: Option<ServiceEndpoint>,
}

impl ControlPlaneTopology {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            dashboard: None,
            gateway: None,
            mdcb: None,
            redis: None,
            mongo: None,
        }
    }
}

/// One tenant's isolated deployment, identified by the numeric suffix of its
/// namespace. Namespaces without a parseable suffix carry index 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPlaneTopology {
    pub namespace: String,
    pub index: u32,
    pub redis: Option<ServiceEndpoint>,
    pub gateway: Option<ServiceEndpoint>,
}

impl DataPlaneTopology {
    pub fn new(namespace: impl Into<String>, index: u32) -> Self {
        Self {
            namespace: namespace.into(),
            index,
            redis: None,
            gateway: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_address() {
        let ep = ServiceEndpoint::new("tyk-dashboard", "tyk", 3000);
        assert_eq!(ep.dns_name(), "tyk-dashboard.tyk.svc");
        assert_eq!(ep.address(), "tyk-dashboard.tyk.svc:3000");
    }

    #[test]
    fn test_missing_roles_default_to_none() {
        let cp = ControlPlaneTopology::new("tyk");
        assert!(cp.dashboard.is_none());
        assert!(cp.mongo.is_none());

        let dp = DataPlaneTopology::new("tyk-dp-3", 3);
        assert_eq!(dp.index, 3);
        assert!(dp.redis.is_none());
    }
}
