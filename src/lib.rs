//! toxifabric
//!
//! Discovers a Tyk multi-tenant deployment's topology in Kubernetes, derives
//! a deterministic toxiproxy plan, and synchronizes it into the running
//! fleet plus the Service object fronting it. Each run recomputes everything
//! from live cluster state; both external systems are overwrite targets, so
//! reruns are idempotent.

pub mod cli;
pub mod error;
pub mod k8s;
pub mod output;
pub mod topology;
pub mod toxiproxy;

use std::time::Duration;

use tracing::{info, warn};

use crate::cli::Cli;
use crate::error::AppResult;
use crate::k8s::{reconcile_service, Discovery, K8sClient};
use crate::output::{env_vars, format_env, hosts_entries, OutputFormat};
use crate::topology::build_plan;
use crate::toxiproxy::ToxiproxyClient;

/// Execute one configuration run against the ambient cluster config.
pub async fn run(cli: &Cli) -> AppResult<()> {
    let k8s = K8sClient::new().await?;
    run_with(k8s, cli).await
}

/// Execute one configuration run with an already-constructed cluster client.
/// Sequential throughout: discovery, plan, fleet sync, Service
/// reconciliation, harness output. Only the Service patch is allowed to
/// fail without failing the run.
pub async fn run_with(k8s: K8sClient, cli: &Cli) -> AppResult<()> {
    // Resolve the output format up front so an unknown selector aborts
    // before any mutation.
    let format: Option<OutputFormat> = match &cli.output_env {
        Some(s) => Some(s.parse()?),
        None => None,
    };

    info!("Discovering Kubernetes services");
    let discovery = Discovery::new(k8s.clone());

    let control_plane = discovery.discover_control_plane(&cli.control_namespace).await?;
    let data_planes = discovery.discover_data_planes(&cli.namespace_pattern).await?;
    info!(count = data_planes.len(), "Found data planes");

    if cli.output_hosts {
        // Discovery-only path: no plan, no fleet or Service mutation.
        println!("{}", hosts_entries(&data_planes).join("\n"));
        return Ok(());
    }

    let plan = build_plan(&control_plane, &data_planes)?;

    info!(url = %cli.toxiproxy_url, "Connecting to toxiproxy");
    let fleet = ToxiproxyClient::new(&cli.toxiproxy_url)?;
    let applied = fleet
        .sync(&plan, Duration::from_secs(cli.ready_timeout))
        .await?;
    info!(proxies = applied, "Fleet synchronized");

    if let Err(e) = reconcile_service(&k8s, &cli.control_namespace, &cli.service_name, &plan).await
    {
        warn!(error = %e, "Service reconciliation failed; fleet is configured, continuing");
    }

    if let Some(format) = format {
        println!("{}", format_env(format, &env_vars(&cli.toxiproxy_url, &data_planes)));
    }

    Ok(())
}
