//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Run the bugtrail binary in `dir` with colors and logging turned off.
pub fn run_bugtrail_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bugtrail"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute bugtrail binary")
}

/// Run bugtrail and panic with its stderr if it fails.
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run_bugtrail_in_dir(dir, args);
    assert!(
        output.status.success(),
        "bugtrail {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Run bugtrail with `--json` and parse its output.
pub fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let stdout = run_ok(dir, &full);
    serde_json::from_str(&stdout).expect("output should be valid JSON")
}
