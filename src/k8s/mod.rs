//! Kubernetes integration
//!
//! - Explicit client construction (kubeconfig or in-cluster)
//! - Read-only discovery of control-plane and data-plane services
//! - Best-effort exposure of the fleet's ports on its Service object

mod client;
mod discovery;
mod exposure;

pub use client::K8sClient;
pub use discovery::{extract_index, index_regex, Discovery, COMPONENT_LABEL};
pub use exposure::{exposure_patch, reconcile_service, TOXIPROXY_API_PORT};
