//! Error taxonomy for the configuration run
//!
//! Every fatal condition unwinds to `main` as one of these variants and maps
//! to a non-zero process exit. Absent roles are not errors (see
//! `k8s::discovery`), and a failed Service patch is reported as a warning by
//! the caller rather than through this type.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Cluster credentials/context could not be established.
    #[error("failed to load Kubernetes configuration: {0}")]
    Config(#[source] kube::Error),

    /// Namespace or service listing failed at the registry.
    #[error("failed to list {resource}: {source}")]
    Enumeration {
        resource: &'static str,
        #[source]
        source: kube::Error,
    },

    /// The derived plan violated one of its own invariants.
    #[error("proxy plan invariant violated: {0}")]
    PlanInvariant(String),

    /// The fleet never reported ready within the timeout.
    #[error("toxiproxy at {url} not ready after {timeout_secs}s")]
    FleetUnavailable { url: String, timeout_secs: u64 },

    /// The fleet HTTP client could not be constructed.
    #[error("failed to build toxiproxy client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Bulk replace against a ready fleet failed.
    #[error("failed to populate toxiproxy: {0}")]
    SyncFailed(#[source] reqwest::Error),

    /// The Service port-list patch failed. Callers treat this as a warning.
    #[error("failed to patch toxiproxy Service: {0}")]
    Reconcile(#[source] kube::Error),

    /// Unrecognized `--output-env` selector.
    #[error("unknown output format: {0} (expected 'shell' or 'github-actions')")]
    OutputFormat(String),

    #[error("invalid toxiproxy URL {url}: {reason}")]
    InvalidFleetUrl { url: String, reason: String },

    #[error("invalid namespace pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_build_error_does_not_claim_populate_failed() {
        let e = reqwest::Client::new().get("ht!tp://x").build().unwrap_err();
        let err = AppError::ClientBuild(e);
        assert!(err
            .to_string()
            .starts_with("failed to build toxiproxy client"));
    }
}
