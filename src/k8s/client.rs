//! Kubernetes client wrapper
//!
//! One explicitly constructed client per run; credential/context resolution
//! happens in `new()` and nowhere else.

use k8s_openapi::api::core::v1::{Namespace, Service};
use kube::{api::Api, Client, Config};
use tracing::{debug, instrument};

use crate::error::{AppError, AppResult};

/// Wrapper around `kube::Client` with typed accessors for the resources the
/// run touches.
#[derive(Clone)]
pub struct K8sClient {
    client: Client,
}

impl K8sClient {
    /// Create a client from the default kubeconfig or in-cluster config.
    #[instrument(skip_all)]
    pub async fn new() -> AppResult<Self> {
        let config = Config::infer()
            .await
            .map_err(|e| AppError::Config(kube::Error::InferConfig(e)))?;
        let client = Client::try_from(config).map_err(AppError::Config)?;

        debug!("Connected to Kubernetes cluster");

        Ok(Self { client })
    }

    /// Wrap an already-constructed kube client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Cluster-scoped namespace API.
    pub fn namespaces(&self) -> Api<Namespace> {
        Api::all(self.client.clone())
    }

    /// Service API for one namespace.
    pub fn services(&self, namespace: &str) -> Api<Service> {
        Api::namespaced(self.client.clone(), namespace)
    }
}
