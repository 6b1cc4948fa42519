//! Tests for harness output formatting

use std::collections::BTreeMap;

use toxifabric::output::{env_vars, format_env, hosts_entries, OutputFormat};
use toxifabric::topology::DataPlaneTopology;

#[test]
fn test_shell_format_exact() {
    let vars = BTreeMap::from([(
        "TOXIPROXY_URL".to_string(),
        "http://x:8474".to_string(),
    )]);
    assert_eq!(
        format_env(OutputFormat::Shell, &vars),
        "export TOXIPROXY_URL=\"http://x:8474\""
    );
}

#[test]
fn test_github_actions_format_exact() {
    let vars = BTreeMap::from([(
        "TOXIPROXY_URL".to_string(),
        "http://x:8474".to_string(),
    )]);
    assert_eq!(
        format_env(OutputFormat::GithubActions, &vars),
        "TOXIPROXY_URL=http://x:8474"
    );
}

#[test]
fn test_env_output_is_sorted_by_key() {
    let planes = vec![
        DataPlaneTopology::new("tyk-dp-2", 2),
        DataPlaneTopology::new("tyk-dp-0", 0),
    ];
    let rendered = format_env(
        OutputFormat::GithubActions,
        &env_vars("http://localhost:8474", &planes),
    );

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "TOXIPROXY_URL=http://localhost:8474",
            "TYK_TEST_BASE_URL=http://chart-dash.test/",
            "TYK_TEST_GW_0_ALFA_URL=http://chart-gw-dp-0.test/",
            "TYK_TEST_GW_2_ALFA_URL=http://chart-gw-dp-2.test/",
            "TYK_TEST_GW_SECRET=352d20ee67be67f6340b4c0605b044b7",
            "TYK_TEST_GW_URL=http://chart-gw.test/",
        ]
    );
}

#[test]
fn test_hosts_entries() {
    let planes = vec![
        DataPlaneTopology::new("tyk-dp-0", 0),
        DataPlaneTopology::new("tyk-dp-3", 3),
    ];
    assert_eq!(
        hosts_entries(&planes),
        vec![
            "127.0.0.1 chart-dash.test",
            "127.0.0.1 chart-gw.test",
            "127.0.0.1 chart-mdcb.test",
            "127.0.0.1 chart-gw-dp-0.test",
            "127.0.0.1 chart-gw-dp-3.test",
        ]
    );
}

#[test]
fn test_hosts_entries_without_planes() {
    assert_eq!(hosts_entries(&[]).len(), 3);
}
