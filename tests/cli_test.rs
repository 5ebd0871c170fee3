//! CLI contract tests
//!
//! Runs the compiled binary against small workspaces and checks output
//! formats, --output, --fail-below and the graph/drift/init commands.

use std::fs;
use std::path::Path;
use std::process::Command;

fn monorepo_health_bin() -> String {
    env!("CARGO_BIN_EXE_monorepo-health").to_string()
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Two packages in a cycle, declaring typescript at different versions
fn setup_workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("pnpm-workspace.yaml"), "packages:\n  - 'packages/*'\n");
    write(
        &root.join("packages/a/package.json"),
        r#"{"name":"@x/a","version":"1.0.0","dependencies":{"@x/b":"workspace:*"},
            "devDependencies":{"typescript":"^5.3.0"}}"#,
    );
    write(
        &root.join("packages/b/package.json"),
        r#"{"name":"@x/b","version":"1.0.0","dependencies":{"@x/a":"workspace:*"},
            "devDependencies":{"typescript":"^5.4.0"}}"#,
    );
    dir
}

fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(monorepo_health_bin())
        .args(args)
        .arg(dir)
        .env_remove("RUST_LOG")
        .env_remove("MONOREPO_HEALTH_CONFIG")
        .output()
        .unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_check_json_output() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(dir.path(), &["check", "--format", "json"]);
    assert_eq!(code, 0);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(report["packages"]["@x/a"]["score"].is_number());
    assert_eq!(
        report["dependencies"]["issues"][0],
        "Circular dependency: @x/a <-> @x/b"
    );
    assert_eq!(report["dependencies"]["drift"][0]["dependency"], "typescript");
    let architecture = report["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["type"] == "architecture")
        .count();
    assert_eq!(architecture, 1);
}

#[test]
fn test_default_command_is_text_check() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(dir.path(), &[]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Monorepo Health"));
    assert!(stdout.contains("@x/a"));
}

#[test]
fn test_output_flag_writes_file() {
    let dir = setup_workspace();
    let out = dir.path().join("health.md");
    let (code, stdout, stderr) = run(
        dir.path(),
        &["check", "--format", "markdown", "--output", out.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(stdout.trim().is_empty());
    assert!(stderr.contains("Report written to"));
    let md = fs::read_to_string(&out).unwrap();
    assert!(md.contains("# "));
    assert!(md.contains("## Recommendations"));
}

#[test]
fn test_fail_below_sets_exit_code() {
    let dir = setup_workspace();
    let (code, _, stderr) = run(dir.path(), &["check", "--format", "json", "--fail-below", "99"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("below --fail-below=99"));

    let (code, _, _) = run(dir.path(), &["check", "--format", "json", "--fail-below", "0"]);
    assert_eq!(code, 0);
}

#[test]
fn test_fail_below_from_project_config() {
    let dir = setup_workspace();
    write(
        &dir.path().join("monorepo-health.toml"),
        "[defaults]\nformat = \"json\"\nfail_below = 99\n",
    );
    let (code, stdout, _) = run(dir.path(), &["check"]);
    assert_eq!(code, 1);
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn test_signals_flag() {
    let dir = setup_workspace();
    let signals = dir.path().join("signals.json");
    write(
        &signals,
        r#"{"packages":{"@x/a":{"buildTimeMs":45000}}}"#,
    );
    let (code, stdout, _) = run(
        dir.path(),
        &["check", "--format", "json", "--signals", signals.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        report["performance"]["issues"][0],
        "Slow build time for @x/a: 45000ms"
    );
}

#[test]
fn test_graph_command() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(dir.path(), &["graph", "--format", "json"]);
    assert_eq!(code, 0);
    let out: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(out["graph"]["@x/a"], serde_json::json!(["@x/b"]));
    assert_eq!(out["cycles"]["cycles"][0], serde_json::json!(["@x/a", "@x/b"]));

    let (code, stdout, _) = run(dir.path(), &["graph"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Circular dependency: @x/a <-> @x/b"));
}

#[test]
fn test_graph_marks_only_cycle_edges() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("pnpm-workspace.yaml"), "packages:\n  - 'packages/*'\n");
    write(
        &root.join("packages/a/package.json"),
        r#"{"name":"@x/a","dependencies":{"@x/b":"*","@x/c":"*"}}"#,
    );
    write(&root.join("packages/b/package.json"), r#"{"name":"@x/b","dependencies":{"@x/c":"*"}}"#);
    write(&root.join("packages/c/package.json"), r#"{"name":"@x/c","dependencies":{"@x/a":"*"}}"#);

    let (code, stdout, _) = run(root, &["graph"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("↻ @x/b"));
    assert!(stdout.contains("→ @x/c"));
    assert!(stdout.contains("Circular dependency: @x/a -> @x/b -> @x/c -> @x/a"));
}

#[test]
fn test_drift_command() {
    let dir = setup_workspace();
    let (code, stdout, _) = run(dir.path(), &["drift"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("typescript"));
    assert!(stdout.contains("^5.3.0"));

    let (code, stdout, _) = run(dir.path(), &["drift", "--format", "json"]);
    assert_eq!(code, 0);
    let drift: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(drift.as_array().unwrap().len(), 1);
}

#[test]
fn test_init_command() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("monorepo-health.toml");

    let (code, _, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(fs::read_to_string(&config).unwrap().contains("[scoring]"));

    fs::write(&config, "# custom\n").unwrap();
    let (code, stdout, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("--force"));
    assert_eq!(fs::read_to_string(&config).unwrap(), "# custom\n");

    let (code, _, _) = run(dir.path(), &["init", "--force"]);
    assert_eq!(code, 0);
    assert!(fs::read_to_string(&config).unwrap().contains("[graph]"));
}

#[test]
fn test_malformed_manifest_is_reported() {
    let dir = setup_workspace();
    write(&dir.path().join("packages/broken/package.json"), "{");
    let (code, _, stderr) = run(dir.path(), &["check"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to parse manifest"));
}

#[test]
fn test_nonexistent_path() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(&dir.path().join("missing"), &["check"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Path does not exist"));
}
