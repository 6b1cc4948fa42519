//! Toxiproxy Service exposure
//!
//! Keeps the Service object fronting the fleet aligned with the plan's
//! listen ports so the test harness can reach each proxy from outside the
//! cluster. The patch replaces the port list wholesale; ports not derived
//! from the current plan are dropped. Failures here are reported to the
//! caller as warnings, never as run failures, because the fleet itself is
//! already configured.

use kube::api::{Patch, PatchParams};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::error::{AppError, AppResult};
use crate::k8s::client::K8sClient;
use crate::topology::ProxyPlan;

/// Toxiproxy's own HTTP API port, always exposed first.
pub const TOXIPROXY_API_PORT: u16 = 8474;

/// Build the full `spec.ports` replacement for the Service patch.
pub fn exposure_patch(plan: &ProxyPlan) -> Value {
    let mut ports = vec![json!({
        "name": "api",
        "port": TOXIPROXY_API_PORT,
        "targetPort": TOXIPROXY_API_PORT,
        "protocol": "TCP",
    })];

    for (name, port) in plan.port_mappings() {
        ports.push(json!({
            "name": name,
            "port": port,
            "targetPort": port,
            "protocol": "TCP",
        }));
    }

    json!({ "spec": { "ports": ports } })
}

/// Patch `service_name` in `namespace` so its exposed ports match `plan`.
#[instrument(skip(client, plan), fields(proxies = plan.len()))]
pub async fn reconcile_service(
    client: &K8sClient,
    namespace: &str,
    service_name: &str,
    plan: &ProxyPlan,
) -> AppResult<()> {
    let services = client.services(namespace);
    let patch = exposure_patch(plan);

    services
        .patch(service_name, &PatchParams::default(), &Patch::Merge(&patch))
        .await
        .map_err(AppError::Reconcile)?;

    info!(namespace, service_name, "Patched toxiproxy Service ports");
    Ok(())
}
