//! Stamps the commit and build time into `tmugs --version`.
//!
//! Either value can be pinned from the environment for reproducible builds;
//! without git the commit reads `unknown`.

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const HASH_ENV: &str = "TMUGS_BUILD_GIT_HASH";
const TIMESTAMP_ENV: &str = "TMUGS_BUILD_TIMESTAMP";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed={HASH_ENV}");
    println!("cargo:rerun-if-env-changed={TIMESTAMP_ENV}");

    let hash = env::var(HASH_ENV)
        .ok()
        .or_else(|| capture("git", &["describe", "--always", "--dirty", "--abbrev=12"]))
        .unwrap_or_else(|| "unknown".to_string());
    let timestamp = env::var(TIMESTAMP_ENV)
        .ok()
        .or_else(|| capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]))
        .unwrap_or_else(epoch_seconds);

    println!("cargo:rustc-env={HASH_ENV}={hash}");
    println!("cargo:rustc-env={TIMESTAMP_ENV}={timestamp}");
}

fn epoch_seconds() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    format!("unix:{secs}")
}

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|value| !value.is_empty())
}
