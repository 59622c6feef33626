use std::path::Path;
use std::process::{Command, Output};

use serde_json::json;
use tempfile::TempDir;

pub const BASE_URI: &str = "http://localhost:8080";

/// Write `count` entries of feed `namespace/test` as JSON lines.
///
/// Entry `e{n}` is updated `n` minutes past midnight; odd entries carry the
/// category `odd`.
pub fn fixture(count: u32) -> (TempDir, String) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("entries.jsonl");

    let lines: Vec<String> = (1..=count)
        .map(|n| {
            let at = format!("2024-01-01T{:02}:{:02}:00Z", n / 60, n % 60);
            let categories: Vec<&str> = if n % 2 == 1 { vec!["odd"] } else { vec![] };
            json!({
                "id": format!("e{n}"),
                "feed": "namespace/test",
                "created_at": at,
                "updated_at": at,
                "categories": categories,
                "body": format!(
                    "<entry xmlns=\"http://www.w3.org/2005/Atom\"><id>e{n}</id><title>Entry {n}</title></entry>"
                ),
            })
            .to_string()
        })
        .collect();
    std::fs::write(&path, lines.join("\n")).expect("Failed to write fixture");

    let url = store_url(&path);
    (dir, url)
}

pub fn store_url(path: &Path) -> String {
    url::Url::from_file_path(path)
        .expect("Fixture path must be absolute")
        .to_string()
}

/// Run the CLI binary against a store.
pub fn run_cli(store: &str, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hopper"));
    cmd.args(args);
    cmd.env("HOPPER_STORE", store);
    cmd.env("HOPPER_BASE_URI", BASE_URI);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(store: &str, args: &[&str]) -> String {
    let output = run_cli(store, args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(store: &str, args: &[&str]) -> String {
    let output = run_cli(store, args);
    assert!(
        !output.status.success(),
        "CLI command unexpectedly succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parse `--format links` output into (rel, href) pairs.
pub fn links(stdout: &str) -> Vec<(String, String)> {
    stdout
        .lines()
        .filter_map(|line| line.split_once(": "))
        .map(|(rel, href)| (rel.to_string(), href.to_string()))
        .collect()
}

pub fn href<'a>(links: &'a [(String, String)], rel: &str) -> Option<&'a str> {
    links
        .iter()
        .find(|(r, _)| r == rel)
        .map(|(_, href)| href.as_str())
}
