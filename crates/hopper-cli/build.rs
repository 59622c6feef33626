//! Build script that stamps the binary with a version string.

use std::process::Command;

fn main() {
    // Re-stamp when HEAD moves or a tag is added
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // Outside a git checkout (e.g. a crates.io build) use the manifest version
    let version = describe_head().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=HOPPER_VERSION={}", version);
}

/// `git describe` for HEAD, with a `-dirty` suffix for uncommitted changes.
fn describe_head() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();

    // Tags are `v1.2.3`; clap prints `hopper 1.2.3`
    match described.strip_prefix('v').unwrap_or(described) {
        "" => None,
        version => Some(version.to_string()),
    }
}
