//! Test-harness output materialization
//!
//! Pure formatting over discovery output: environment variables for the
//! resilience test suite and `/etc/hosts` entries for local name resolution.
//! Everything lands on stdout; diagnostics stay on stderr.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::AppError;
use crate::topology::DataPlaneTopology;

/// How environment variables are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `export KEY="VALUE"` lines for shell sourcing.
    Shell,
    /// `KEY=VALUE` lines for `$GITHUB_ENV` appends.
    GithubActions,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shell" => Ok(OutputFormat::Shell),
            "github-actions" => Ok(OutputFormat::GithubActions),
            other => Err(AppError::OutputFormat(other.to_string())),
        }
    }
}

/// Environment for the test harness: fixed base entries plus one gateway URL
/// per data plane, keyed by plane index. BTreeMap keeps the output sorted.
pub fn env_vars(toxiproxy_url: &str, data_planes: &[DataPlaneTopology]) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::from([
        ("TOXIPROXY_URL".to_string(), toxiproxy_url.to_string()),
        (
            "TYK_TEST_BASE_URL".to_string(),
            "http://chart-dash.test/".to_string(),
        ),
        (
            "TYK_TEST_GW_URL".to_string(),
            "http://chart-gw.test/".to_string(),
        ),
        (
            "TYK_TEST_GW_SECRET".to_string(),
            "352d20ee67be67f6340b4c0605b044b7".to_string(),
        ),
    ]);

    for dp in data_planes {
        vars.insert(
            format!("TYK_TEST_GW_{}_ALFA_URL", dp.index),
            format!("http://chart-gw-dp-{}.test/", dp.index),
        );
    }

    vars
}

/// `/etc/hosts` lines: fixed control-plane names plus one per data plane.
pub fn hosts_entries(data_planes: &[DataPlaneTopology]) -> Vec<String> {
    let mut entries = vec![
        "127.0.0.1 chart-dash.test".to_string(),
        "127.0.0.1 chart-gw.test".to_string(),
        "127.0.0.1 chart-mdcb.test".to_string(),
    ];
    for dp in data_planes {
        entries.push(format!("127.0.0.1 chart-gw-dp-{}.test", dp.index));
    }
    entries
}

/// Render the env map in the requested format, sorted by key,
/// newline-joined, no trailing newline.
pub fn format_env(format: OutputFormat, vars: &BTreeMap<String, String>) -> String {
    let lines: Vec<String> = match format {
        OutputFormat::Shell => vars
            .iter()
            .map(|(k, v)| format!("export {}=\"{}\"", k, v))
            .collect(),
        OutputFormat::GithubActions => {
            vars.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
        }
    };
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("shell".parse::<OutputFormat>().unwrap(), OutputFormat::Shell);
        assert_eq!(
            "github-actions".parse::<OutputFormat>().unwrap(),
            OutputFormat::GithubActions
        );
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(AppError::OutputFormat(_))
        ));
    }

    #[test]
    fn test_env_vars_include_one_url_per_plane() {
        let planes = vec![
            DataPlaneTopology::new("tyk-dp-0", 0),
            DataPlaneTopology::new("tyk-dp-2", 2),
        ];
        let vars = env_vars("http://x:8474", &planes);

        assert_eq!(vars["TOXIPROXY_URL"], "http://x:8474");
        assert_eq!(vars["TYK_TEST_GW_0_ALFA_URL"], "http://chart-gw-dp-0.test/");
        assert_eq!(vars["TYK_TEST_GW_2_ALFA_URL"], "http://chart-gw-dp-2.test/");
        assert_eq!(vars.len(), 6);
    }
}
