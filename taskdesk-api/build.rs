//! Build identification for the startup banner and `GET /api/buildinfo`

use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    emit("GIT_HASH", &git_short_hash().unwrap_or_else(|| UNKNOWN.to_string()));
    emit("BUILD_TIMESTAMP", &build_timestamp());
    emit(
        "BUILD_PROFILE",
        &std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string()),
    );

    // No rerun-if-changed: rerun every build so hash and timestamp are current
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={}={}", key, value);
}

/// `None` outside a git checkout or without git installed
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string()).filter(|h| !h.is_empty())
}

/// Local time with offset, second precision
fn build_timestamp() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
}
