//! Command-line surface

use clap::Parser;

/// Dynamic toxiproxy configuration for Tyk K8s resilience testing.
///
/// Discovers control-plane and data-plane services, derives a deterministic
/// proxy plan, pushes it to the toxiproxy fleet, and aligns the fleet's
/// Service object with the plan's listen ports.
#[derive(Debug, Clone, Parser)]
#[command(name = "toxifabric", version)]
pub struct Cli {
    /// Toxiproxy API URL
    #[arg(short = 't', long, env = "TOXIPROXY_URL", default_value = "http://localhost:8474")]
    pub toxiproxy_url: String,

    /// Glob pattern for data plane namespaces
    #[arg(short = 'n', long, default_value = "tyk-dp-*")]
    pub namespace_pattern: String,

    /// Control plane namespace
    #[arg(short = 'c', long, default_value = "tyk")]
    pub control_namespace: String,

    /// Name of the Service object fronting the toxiproxy fleet
    #[arg(long, default_value = "toxiproxy")]
    pub service_name: String,

    /// Seconds to wait for the fleet to become ready
    #[arg(long, default_value_t = 30)]
    pub ready_timeout: u64,

    /// Output format for env vars: shell, github-actions
    #[arg(short = 'o', long)]
    pub output_env: Option<String>,

    /// Output /etc/hosts entries only and skip all synchronization
    #[arg(long)]
    pub output_hosts: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["toxifabric"]);
        assert_eq!(cli.toxiproxy_url, "http://localhost:8474");
        assert_eq!(cli.namespace_pattern, "tyk-dp-*");
        assert_eq!(cli.control_namespace, "tyk");
        assert_eq!(cli.service_name, "toxiproxy");
        assert_eq!(cli.ready_timeout, 30);
        assert!(cli.output_env.is_none());
        assert!(!cli.output_hosts);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from([
            "toxifabric",
            "-t",
            "http://toxiproxy.tyk.svc:8474",
            "-n",
            "tenant-*",
            "-c",
            "mgmt",
            "-o",
            "shell",
            "-v",
        ]);
        assert_eq!(cli.toxiproxy_url, "http://toxiproxy.tyk.svc:8474");
        assert_eq!(cli.namespace_pattern, "tenant-*");
        assert_eq!(cli.control_namespace, "mgmt");
        assert_eq!(cli.output_env.as_deref(), Some("shell"));
        assert!(cli.verbose);
    }
}
