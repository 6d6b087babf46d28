//! Integration tests for the dwgraph CLI

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// Command isolated from the user's data directory and config file
fn dwgraph(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dwgraph").unwrap();
    cmd.env("DWGRAPH_DATA_DIR", dir.join("data"))
        .env("DWGRAPH_CONFIG", dir.join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

/// 1 -> 2 (1), 2 -> 3 (2), 1 -> 3 (5) plus an isolated node 4
fn sample_workspace() -> TempDir {
    let dir = tempdir().unwrap();
    for key in ["1", "2", "3", "4"] {
        dwgraph(dir.path())
            .args(["node", "add", key])
            .assert()
            .success();
    }
    for (src, dest, weight) in [("1", "2", "1"), ("2", "3", "2"), ("1", "3", "5")] {
        dwgraph(dir.path())
            .args(["edge", "add", src, dest, weight])
            .assert()
            .success();
    }
    dir
}

#[test]
fn test_help_lists_commands() {
    let dir = tempdir().unwrap();
    dwgraph(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: dwgraph"))
        .stdout(predicate::str::contains("node"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn test_node_add_and_list() {
    let dir = tempdir().unwrap();
    dwgraph(dir.path())
        .args(["node", "add", "7", "--x", "1", "--y", "2", "--info", "depot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added node 7"));

    dwgraph(dir.path())
        .args(["node", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7 @ 1,2,0 - depot"));
}

#[test]
fn test_duplicate_node_is_reported() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["node", "add", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_edge_to_missing_node() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["edge", "add", "1", "99", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Destination node 99 not found"));
}

#[test]
fn test_negative_weight_is_rejected() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["edge", "add", "1", "4", "-2"])
        .assert()
        .failure();
}

#[test]
fn test_shortest_path() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["path", "find", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 -> 2 -> 3"))
        .stdout(predicate::str::contains("2 hops, total weight: 3.00"));
}

#[test]
fn test_shortest_distance() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["path", "distance", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));
}

#[test]
fn test_unreachable_target() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["path", "distance", "1", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unreachable"));

    dwgraph(dir.path())
        .args(["path", "find", "3", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no path"));
}

#[test]
fn test_distance_json_uses_null() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["--format", "json", "path", "distance", "1", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"distance\": null"));
}

#[test]
fn test_connectivity() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["path", "connected"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strongly connected: false"));

    dwgraph(dir.path())
        .args(["node", "remove", "4"])
        .assert()
        .success();
    dwgraph(dir.path())
        .args(["edge", "add", "3", "1", "1"])
        .assert()
        .success();
    dwgraph(dir.path())
        .args(["path", "connected"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strongly connected: true"));
}

#[test]
fn test_removing_node_drops_paths() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["node", "remove", "2"])
        .assert()
        .success();
    dwgraph(dir.path())
        .args(["path", "distance", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\n"));
}

#[test]
fn test_graph_info_and_list() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["graph", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes: 4"))
        .stdout(predicate::str::contains("edges: 3"));

    dwgraph(dir.path())
        .args(["graph", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default (current)"));
}

#[test]
fn test_graph_copy_and_delete() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["graph", "copy", "backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(4 nodes, 3 edges)"));

    dwgraph(dir.path())
        .args(["--graph", "backup", "path", "find", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 -> 2 -> 3"));

    dwgraph(dir.path())
        .args(["graph", "copy", "backup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    dwgraph(dir.path())
        .args(["graph", "delete", "backup"])
        .assert()
        .success();
    dwgraph(dir.path())
        .args(["graph", "delete", "backup"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_graph_name() {
    let dir = tempdir().unwrap();
    dwgraph(dir.path())
        .args(["--graph", "../escape", "node", "add", "1"])
        .assert()
        .failure();
}

#[test]
fn test_export_import_round_trip() {
    let dir = sample_workspace();
    let file = dir.path().join("graph.json");

    dwgraph(dir.path())
        .args(["export", "--output"])
        .arg(&file)
        .assert()
        .success();

    let text = std::fs::read_to_string(&file).unwrap();
    assert!(text.contains("\"version\": 1"));

    dwgraph(dir.path())
        .args(["--graph", "restored", "import"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 4 nodes and 3 edges"));

    dwgraph(dir.path())
        .args(["--graph", "restored", "path", "distance", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));
}

#[test]
fn test_import_refuses_to_overwrite() {
    let dir = sample_workspace();
    let file = dir.path().join("graph.json");
    dwgraph(dir.path())
        .args(["export", "-o"])
        .arg(&file)
        .assert()
        .success();

    dwgraph(dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    dwgraph(dir.path())
        .args(["import", "--force"])
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn test_import_rejects_malformed_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("broken.json");
    std::fs::write(&file, "{ not json").unwrap();

    dwgraph(dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .failure();

    dwgraph(dir.path())
        .args(["graph", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No graphs found"));
}

#[test]
fn test_export_to_stdout() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"nodes\""))
        .stdout(predicate::str::contains("\"type\": \"Edge\""));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempdir().unwrap();
    dwgraph(dir.path())
        .args(["config", "set", "default_graph", "roads"])
        .assert()
        .success();

    dwgraph(dir.path())
        .args(["config", "get", "default_graph"])
        .assert()
        .success()
        .stdout(predicate::str::diff("roads\n"));

    dwgraph(dir.path())
        .args(["config", "set", "format", "xml"])
        .assert()
        .failure();
}

#[test]
fn test_config_default_graph_is_used() {
    let dir = tempdir().unwrap();
    dwgraph(dir.path())
        .args(["config", "set", "default_graph", "roads"])
        .assert()
        .success();
    dwgraph(dir.path())
        .args(["node", "add", "1"])
        .assert()
        .success();

    dwgraph(dir.path())
        .args(["graph", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roads (current)"));
}

#[test]
fn test_connectivity_json_reports_node_count() {
    let dir = sample_workspace();
    dwgraph(dir.path())
        .args(["--format", "json", "path", "connected"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"nodes\": 4"))
        .stdout(predicate::str::contains("\"strongly_connected\": false"));
}

#[test]
fn test_config_unset_restores_default() {
    let dir = tempdir().unwrap();
    dwgraph(dir.path())
        .args(["config", "set", "format", "json"])
        .assert()
        .success();
    dwgraph(dir.path())
        .args(["config", "unset", "format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("format = table (default)"));

    dwgraph(dir.path())
        .args(["config", "get", "format"])
        .assert()
        .success()
        .stdout(predicate::str::diff("table\n"));
}
