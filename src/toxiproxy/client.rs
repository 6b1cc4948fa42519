//! Toxiproxy fleet HTTP client
//!
//! The run is authoritative over the fleet's proxy set: `populate` replaces
//! it wholesale, and proxies not in the payload disappear. The fleet's
//! populate endpoint is treated as atomic; there is no client-side recovery
//! for a partial replace.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{AppError, AppResult};
use crate::topology::ProxyPlan;
use crate::toxiproxy::types::{to_records, ProxyRecord};

/// Seconds between liveness probes while waiting for the fleet.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default wait for the fleet to become ready.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(30);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ToxiproxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ToxiproxyClient {
    /// Build a client for the fleet API at `url`. Host defaults to
    /// `127.0.0.1`, port to 8474 when the URL omits them.
    pub fn new(url: &str) -> AppResult<Self> {
        let parsed = Url::parse(url).map_err(|e| AppError::InvalidFleetUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let host = parsed.host_str().unwrap_or("127.0.0.1");
        let port = parsed.port().unwrap_or(8474);

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AppError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: format!("http://{}:{}", host, port),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the fleet's version string. Doubles as the liveness probe.
    pub async fn version(&self) -> Result<String, reqwest::Error> {
        let resp = self
            .http
            .get(format!("{}/version", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        resp.text().await
    }

    /// Poll until the fleet answers its version endpoint or `timeout`
    /// elapses. Transient probe errors are swallowed and retried; only
    /// timeout exhaustion surfaces.
    #[instrument(skip(self))]
    pub async fn wait_ready(&self, timeout: Duration) -> AppResult<String> {
        let deadline = Instant::now() + timeout;

        loop {
            match self.version().await {
                Ok(version) => {
                    debug!(%version, "Toxiproxy is ready");
                    return Ok(version);
                }
                Err(e) => {
                    debug!(error = %e, "Toxiproxy not ready yet");
                }
            }

            if Instant::now() >= deadline {
                return Err(AppError::FleetUnavailable {
                    url: self.base_url.clone(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Replace the fleet's entire proxy set with `records` in one call.
    pub async fn populate(&self, records: &[ProxyRecord]) -> AppResult<()> {
        self.http
            .post(format!("{}/populate", self.base_url))
            .json(records)
            .send()
            .await
            .map_err(AppError::SyncFailed)?
            .error_for_status()
            .map_err(AppError::SyncFailed)?;
        Ok(())
    }

    /// Wait for readiness, then push the full plan. Returns the number of
    /// proxies applied. No mutation happens if the fleet never becomes
    /// ready.
    #[instrument(skip(self, plan), fields(proxies = plan.len()))]
    pub async fn sync(&self, plan: &ProxyPlan, ready_timeout: Duration) -> AppResult<usize> {
        let version = self.wait_ready(ready_timeout).await?;
        info!(%version, "Connected to toxiproxy");

        let records = to_records(plan);
        self.populate(&records).await?;

        info!(proxies = records.len(), "Configured toxiproxy fleet");
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_defaults() {
        let client = ToxiproxyClient::new("http://localhost:8474").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8474");

        let client = ToxiproxyClient::new("http://toxiproxy.tyk.svc").unwrap();
        assert_eq!(client.base_url(), "http://toxiproxy.tyk.svc:8474");
    }

    #[test]
    fn test_rejects_garbage_url() {
        assert!(matches!(
            ToxiproxyClient::new("not a url"),
            Err(AppError::InvalidFleetUrl { .. })
        ));
    }
}
