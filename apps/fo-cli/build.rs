// build.rs — Embed git and build metadata into the fo binary.
//
// Sets these env vars at compile time:
//   FO_GIT_HASH     — short git commit hash (e.g., "abc1234"), or "unknown"
//   FO_BUILD_DATE   — build date in YYYY-MM-DD format

use std::process::Command;

fn main() {
    let git_hash = git_output(&["rev-parse", "--short", "HEAD"])
        .map(|o| String::from_utf8_lossy(&o).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let dirty = git_output(&["status", "--porcelain"])
        .map(|o| !o.is_empty())
        .unwrap_or(false);

    let hash_suffix = if dirty {
        format!("{}-dirty", git_hash)
    } else {
        git_hash
    };

    println!("cargo:rustc-env=FO_GIT_HASH={}", hash_suffix);
    println!("cargo:rustc-env=FO_BUILD_DATE={}", build_date());

    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/");
}

fn git_output(args: &[&str]) -> Option<Vec<u8>> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| o.stdout)
}

/// Current date as YYYY-MM-DD via `date`, so the build script needs no deps.
fn build_date() -> String {
    Command::new("date")
        .args(["+%Y-%m-%d"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
