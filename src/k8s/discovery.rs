//! Service and topology discovery
//!
//! Roles are located by the `tyk.io/component` label. A lookup that fails
//! for any reason (not found, RBAC, transport) yields `None` — "role not
//! deployed" — and never aborts discovery of the remaining roles or planes.
//! Only namespace enumeration itself is fatal.

use glob::Pattern;
use kube::api::ListParams;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::k8s::client::K8sClient;
use crate::topology::{ControlPlaneTopology, DataPlaneTopology, ServiceEndpoint};

/// Label key identifying a Tyk component service.
pub const COMPONENT_LABEL: &str = "tyk.io/component";

const DEFAULT_DASHBOARD_PORT: u16 = 3000;
const DEFAULT_GATEWAY_PORT: u16 = 8080;
const DEFAULT_MDCB_PORT: u16 = 9091;
const DEFAULT_REDIS_PORT: u16 = 6379;
const DEFAULT_MONGO_PORT: u16 = 27017;

/// Read-only topology discovery over one cluster.
pub struct Discovery {
    client: K8sClient,
}

impl Discovery {
    pub fn new(client: K8sClient) -> Self {
        Self { client }
    }

    /// Look up the first service in `namespace` carrying
    /// `tyk.io/component=<component>`. Falls back to `default_port` when the
    /// service declares no ports. Any registry failure collapses to `None`.
    pub async fn find_service(
        &self,
        namespace: &str,
        component: &str,
        default_port: u16,
    ) -> Option<ServiceEndpoint> {
        let selector = format!("{}={}", COMPONENT_LABEL, component);
        let services = self.client.services(namespace);

        let list = match services.list(&ListParams::default().labels(&selector)).await {
            Ok(list) => list,
            Err(e) => {
                debug!(namespace, component, error = %e, "Service lookup failed, treating role as absent");
                return None;
            }
        };

        let svc = list.items.into_iter().next()?;
        let name = svc.metadata.name?;
        let port = svc
            .spec
            .as_ref()
            .and_then(|spec| spec.ports.as_ref())
            .and_then(|ports| ports.first())
            .and_then(|p| u16::try_from(p.port).ok())
            .unwrap_or(default_port);

        debug!(namespace, component, name, port, "Resolved service");
        Some(ServiceEndpoint::new(name, namespace, port))
    }

    /// List namespaces matching `pattern`, sorted by extracted data-plane
    /// index ascending (stable, so equal indices keep enumeration order).
    pub async fn discover_namespaces(&self, pattern: &str) -> AppResult<Vec<String>> {
        let glob = Pattern::new(pattern).map_err(|e| AppError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        let index_re = index_regex(pattern);

        let namespaces = self
            .client
            .namespaces()
            .list(&ListParams::default())
            .await
            .map_err(|e| AppError::Enumeration {
                resource: "namespaces",
                source: e,
            })?;

        let mut matching: Vec<String> = namespaces
            .items
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .filter(|name| glob.matches(name))
            .collect();

        matching.sort_by_key(|name| extract_index(&index_re, name));
        Ok(matching)
    }

    /// Discover every data plane whose namespace matches `pattern`, ordered
    /// by index ascending.
    pub async fn discover_data_planes(
        &self,
        pattern: &str,
    ) -> AppResult<Vec<DataPlaneTopology>> {
        let namespaces = self.discover_namespaces(pattern).await?;
        let index_re = index_regex(pattern);
        let mut data_planes = Vec::with_capacity(namespaces.len());

        for ns in namespaces {
            let index = extract_index(&index_re, &ns);
            let mut dp = DataPlaneTopology::new(ns.clone(), index);

            dp.redis = self.find_service(&ns, "redis", DEFAULT_REDIS_PORT).await;
            dp.gateway = self.find_service(&ns, "gateway", DEFAULT_GATEWAY_PORT).await;

            if dp.redis.is_none() {
                warn!(namespace = %ns, "Data plane has no redis service");
            }
            data_planes.push(dp);
        }

        Ok(data_planes)
    }

    /// Resolve the five fixed control-plane roles in `namespace`.
    pub async fn discover_control_plane(
        &self,
        namespace: &str,
    ) -> AppResult<ControlPlaneTopology> {
        let mut cp = ControlPlaneTopology::new(namespace);

        cp.dashboard = self
            .find_service(namespace, "dashboard", DEFAULT_DASHBOARD_PORT)
            .await;
        cp.gateway = self
            .find_service(namespace, "gateway", DEFAULT_GATEWAY_PORT)
            .await;
        cp.mdcb = self.find_service(namespace, "mdcb", DEFAULT_MDCB_PORT).await;
        cp.redis = self
            .find_service(namespace, "redis", DEFAULT_REDIS_PORT)
            .await;
        cp.mongo = self
            .find_service(namespace, "mongo", DEFAULT_MONGO_PORT)
            .await;

        Ok(cp)
    }
}

/// Regex extracting a plane index from a namespace name: digits immediately
/// after the namespace pattern's literal prefix (`tyk-dp-*` becomes
/// `^tyk-dp-(\d+)`). The escaped-literal construction cannot fail to
/// compile. Built once per discovery, not per comparison.
pub fn index_regex(pattern: &str) -> Regex {
    let prefix: String = pattern
        .chars()
        .take_while(|c| !matches!(c, '*' | '?' | '['))
        .collect();
    Regex::new(&format!(r"^{}(\d+)", regex::escape(&prefix))).unwrap()
}

/// Extract the numeric index of a data-plane namespace. Names the regex
/// cannot parse get index 0; a malformed name must not abort discovery of
/// the rest.
pub fn extract_index(re: &Regex, namespace: &str) -> u32 {
    re.captures(namespace)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_index() {
        let re = index_regex("tyk-dp-*");
        assert_eq!(extract_index(&re, "tyk-dp-0"), 0);
        assert_eq!(extract_index(&re, "tyk-dp-12"), 12);
        assert_eq!(extract_index(&re, "tyk-dp-x"), 0);
        assert_eq!(extract_index(&re, "tyk"), 0);
    }

    #[test]
    fn test_extract_index_ignores_trailing_suffix() {
        // Digits follow the pattern prefix even when the name carries a
        // further suffix, e.g. a canary namespace.
        let re = index_regex("tyk-dp-*");
        assert_eq!(extract_index(&re, "tyk-dp-2-canary"), 2);
    }

    #[test]
    fn test_extract_index_huge_suffix_defaults_to_zero() {
        // parse::<u32> overflow falls back to the unknown-index sentinel
        let re = index_regex("tyk-dp-*");
        assert_eq!(extract_index(&re, "tyk-dp-99999999999999999999"), 0);
    }

    #[test]
    fn test_index_regex_escapes_literal_prefix() {
        let re = index_regex("tyk.dp-*");
        assert_eq!(extract_index(&re, "tykxdp-3"), 0);
        assert_eq!(extract_index(&re, "tyk.dp-3"), 3);
    }
}
