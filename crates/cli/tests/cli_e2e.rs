//! End-to-end tests for the `shadowops` binary.
//!
//! Every test points the model endpoint at a closed loopback port and clears
//! the API key variables, so each gateway call fails fast and the commands
//! must render the documented fallbacks. Each test runs in its own temp dir
//! so no stray `shadowops.toml` is picked up.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

use shadowops_core::FixtureStore;
use shadowops_intel::gateway::{
    DIVERGENCE_FALLBACK, EFFECTIVENESS_FALLBACK, ROOT_CAUSE_FALLBACK,
    SIMULATION_FALLBACK_REASONING, SUMMARY_FALLBACK,
};

/// Port 9 (discard) is not listening on loopback.
const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Helper: create a Command for the `shadowops` binary inside `dir`.
fn shadowops(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("shadowops");
    cmd.current_dir(dir.path())
        .env("SHADOWOPS_BASE_URL", UNREACHABLE)
        .env_remove("SHADOWOPS_MODEL")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run shadowops");
    assert!(
        output.status.success(),
        "exit {:?}, stderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    shadowops(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shadow-work analytics dashboard"))
        .stdout(predicate::str::contains("reality"))
        .stdout(predicate::str::contains("simulate"));
}

#[test]
fn version_exits_0() {
    let dir = TempDir::new().unwrap();
    shadowops(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shadowops"));
}

// ──────────────────────────────────────────────
// 2. Dashboard and read-only views
// ──────────────────────────────────────────────

#[test]
fn dashboard_text_falls_back_to_fixed_summary() {
    let dir = TempDir::new().unwrap();
    shadowops(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total gravity:    300.0"))
        .stdout(predicate::str::contains("Interventions:    1/2 resolved"))
        .stdout(predicate::str::contains("Trust index:      63"))
        .stdout(predicate::str::contains(SUMMARY_FALLBACK))
        .stderr(predicate::str::contains("generation failed"));
}

#[test]
fn dashboard_json_reports_metrics_and_alerts() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(shadowops(&dir).args(["--output", "json", "dashboard"]));

    let total = v["metrics"]["totalGravity"].as_f64().unwrap();
    assert!((total - 300.0).abs() < 1e-9);
    assert_eq!(v["metrics"]["invisibleWorkCount"], 4);
    assert_eq!(v["metrics"]["trustIndex"], 63);
    assert_eq!(v["threshold"], 65);
    assert_eq!(v["alerts"], serde_json::json!(["n1", "n4"]));
    assert_eq!(v["hotspots"][0]["id"], "n4");
    assert_eq!(v["summary"], SUMMARY_FALLBACK);
}

#[test]
fn nodes_flags_nodes_above_threshold() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(shadowops(&dir).args(["--output", "json", "nodes"]));
    let alerts: Vec<&str> = v["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["alert"] == true)
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(alerts, vec!["n4", "n1"]);
}

#[test]
fn config_threshold_changes_alerts() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("shadowops.toml"),
        "[inference]\ngravity_alert_threshold = 50\n",
    )
    .unwrap();
    let v = json_stdout(shadowops(&dir).args(["--output", "json", "dashboard"]));
    assert_eq!(v["threshold"], 50);
    assert_eq!(v["alerts"], serde_json::json!(["n1", "n2", "n4"]));
}

#[test]
fn insights_respect_confidence_cutoff() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("strict.toml");
    fs::write(&config, "[inference]\nconfidence_cutoff = \"high\"\n").unwrap();

    let v = json_stdout(shadowops(&dir).args([
        "--output",
        "json",
        "--config",
        config.to_str().unwrap(),
        "insights",
    ]));
    let ids: Vec<&str> = v["insights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["insight"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["i1", "i2"]);
    assert_eq!(v["hidden"], 1);
}

#[test]
fn insights_text_names_related_nodes() {
    let dir = TempDir::new().unwrap();
    shadowops(&dir)
        .arg("insights")
        .assert()
        .success()
        .stdout(predicate::str::contains("PHANTOM_OWNERSHIP (92% confidence)"))
        .stdout(predicate::str::contains("related: Core Platform PRD (v4 Revision)"));
}

#[test]
fn map_reports_bubble_radius() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(shadowops(&dir).args(["--output", "json", "map"]));
    let n4 = v["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "n4")
        .unwrap()
        .clone();
    assert!((n4["radius"].as_f64().unwrap() - 77.9).abs() < 1e-9);
    assert_eq!(v["edges"].as_array().unwrap().len(), 4);
}

#[test]
fn sources_lists_integrations() {
    let dir = TempDir::new().unwrap();
    shadowops(&dir)
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("Google Workspace"))
        .stdout(predicate::str::contains("ERROR"));
}

// ──────────────────────────────────────────────
// 3. Gateway-backed commands
// ──────────────────────────────────────────────

#[test]
fn simulate_falls_back_to_fixed_estimate() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(shadowops(&dir).args([
        "--output",
        "json",
        "simulate",
        "--node",
        "n1",
        "--strategy",
        "Assign a single PRD owner",
    ]));
    assert_eq!(v["reduction"], 15.0);
    assert_eq!(v["reasoning"], SIMULATION_FALLBACK_REASONING);
    assert!((v["projectedGravity"].as_f64().unwrap() - 69.5).abs() < 1e-9);
}

#[test]
fn simulate_unknown_node_exits_1() {
    let dir = TempDir::new().unwrap();
    shadowops(&dir)
        .args(["simulate", "--node", "n99"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("node 'n99' not found"));
}

#[test]
fn unknown_node_error_is_json_with_json_output() {
    let dir = TempDir::new().unwrap();
    let output = shadowops(&dir)
        .args(["--output", "json", "node", "n99"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .find(|l| l.starts_with('{'))
        .expect("json error line");
    let v: Value = serde_json::from_str(line).unwrap();
    assert_eq!(v["error"], "error: node 'n99' not found");
}

#[test]
fn node_lists_intervention_verdicts() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(shadowops(&dir).args(["--output", "json", "node", "n1"]));
    assert_eq!(v["node"]["id"], "n1");
    assert_eq!(v["improving"], true);
    assert_eq!(v["edgeSummary"], "dependency (weight: 4)");
    let interventions = v["interventions"].as_array().unwrap();
    assert_eq!(interventions.len(), 1);
    assert_eq!(interventions[0]["intervention"]["id"], "int1");
    assert_eq!(interventions[0]["verdict"], EFFECTIVENESS_FALLBACK);
}

#[test]
fn reality_falls_back_for_every_call() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(shadowops(&dir).args(["--output", "json", "reality"]));
    assert_eq!(v["workflow"]["id"], "w1");
    assert_eq!(v["analysis"], DIVERGENCE_FALLBACK);
    let points = v["divergencePoints"].as_array().unwrap();
    let ids: Vec<&str> = points.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["prd_rework", "security_bypass", "wiki_shadow"]);
    for p in points {
        assert_eq!(p["rootCause"], ROOT_CAUSE_FALLBACK);
    }
}

#[test]
fn reality_unknown_workflow_exits_1() {
    let dir = TempDir::new().unwrap();
    shadowops(&dir)
        .args(["reality", "--workflow", "w9"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("workflow 'w9' not found"));
}

// ──────────────────────────────────────────────
// 4. Signals
// ──────────────────────────────────────────────

#[test]
fn signals_csv_has_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let output = shadowops(&dir)
        .args(["signals", "--count", "5", "--seed", "42", "--csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "id,timestamp,type,source,role,objectId");
    assert!(lines[1..].iter().all(|l| l.split(',').count() == 6));
}

#[test]
fn signals_huge_count_keeps_newest_fifty() {
    let dir = TempDir::new().unwrap();
    let output = shadowops(&dir)
        .args(["signals", "--count", "10000000000000", "--seed", "1", "--csv"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 51);
}

#[test]
fn signals_buffer_is_capped() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(shadowops(&dir).args(["--output", "json", "signals", "--count", "80"]));
    assert_eq!(v["count"], 50);
    assert_eq!(v["signals"].as_array().unwrap().len(), 50);
}

// ──────────────────────────────────────────────
// 5. Configuration
// ──────────────────────────────────────────────

#[test]
fn invalid_threshold_in_config_exits_1() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("shadowops.toml"),
        "[inference]\ngravity_alert_threshold = 150\n",
    )
    .unwrap();
    shadowops(&dir)
        .arg("nodes")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("gravity_alert_threshold"));
}

#[test]
fn missing_config_file_exits_1() {
    let dir = TempDir::new().unwrap();
    shadowops(&dir)
        .args(["--config", "nope.toml", "nodes"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not read 'nope.toml'"));
}

#[test]
fn settings_show_effective_model_and_hide_key() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(
        shadowops(&dir)
            .env("GEMINI_API_KEY", "secret-value")
            .args(["--output", "json", "--model", "gemini-2.5-pro", "settings"]),
    );
    assert_eq!(v["settings"]["intelligence"]["model"], "gemini-2.5-pro");
    assert_eq!(v["settings"]["intelligence"]["base_url"], UNREACHABLE);
    assert_eq!(v["apiKey"], "set");
    assert!(!v.to_string().contains("secret-value"));
}

#[test]
fn fixtures_file_replaces_demo_data() {
    let dir = TempDir::new().unwrap();
    let mut store = FixtureStore::mock();
    store.nodes.retain(|n| n.id == "n1" || n.id == "n4");
    store.edges.retain(|e| e.from_node_id == "n1" && e.to_node_id == "n4");
    store.interventions.retain(|i| i.node_id == "n1");
    store.insights.retain(|i| i.id == "i1");
    fs::write(
        dir.path().join("small.json"),
        serde_json::to_string(&store).unwrap(),
    )
    .unwrap();
    fs::write(dir.path().join("shadowops.toml"), "fixtures = \"small.json\"\n").unwrap();

    let v = json_stdout(shadowops(&dir).args(["--output", "json", "nodes"]));
    assert_eq!(v["nodes"].as_array().unwrap().len(), 2);
}

#[test]
fn broken_fixtures_file_exits_1() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
    fs::write(dir.path().join("shadowops.toml"), "fixtures = \"bad.json\"\n").unwrap();
    shadowops(&dir).arg("nodes").assert().failure().code(1);
}
