//! Integration tests for the `meraki` CLI binary.
//!
//! These validate argument parsing, selector conflict handling, help
//! output, and shell completions, all without a live Dashboard.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `meraki` binary with env isolation so tests
/// never pick up a real API key or config overrides.
fn meraki_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("meraki");
    cmd.current_dir(std::env::temp_dir())
        .env_remove("APIKEY")
        .env_remove("MERAKI_BASE_URL")
        .env_remove("MERAKI_TIMEOUT")
        .env_remove("MERAKI_CONCURRENCY")
        .env_remove("MERAKI_MAX_RETRIES");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = meraki_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_reports() {
    meraki_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("clients")
            .and(predicate::str::contains("wireless-count"))
            .and(predicate::str::contains("health-alerts"))
            .and(predicate::str::contains("bssid"))
            .and(predicate::str::contains("content-filter"))
            .and(predicate::str::contains("mx-address")),
    );
}

#[test]
fn test_version_flag() {
    meraki_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("meraki"));
}

// ── Selector handling ───────────────────────────────────────────────

#[test]
fn test_clients_requires_org_selector() {
    let output = meraki_cmd().arg("clients").output().unwrap();
    assert_eq!(
        output.status.code(),
        Some(2),
        "missing selector must be a usage error before any network call"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("--org") || text.contains("required"),
        "Expected selector requirement in output:\n{text}"
    );
}

#[test]
fn test_org_name_and_id_are_mutually_exclusive() {
    let output = meraki_cmd()
        .args(["clients", "-o", "Acme", "-i", "123"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("cannot be used with"),
        "Expected conflict error in output:\n{text}"
    );
}

#[test]
fn test_missing_api_key_exits_auth_code() {
    let output = meraki_cmd()
        .args(["clients", "-o", "Acme"])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(3),
        "missing credential must map to the auth exit code"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("API key") || text.contains("APIKEY"),
        "Expected credential hint in output:\n{text}"
    );
}

#[test]
fn test_wireless_count_rejects_long_lookback() {
    let output = meraki_cmd()
        .args(["wireless-count", "-o", "Acme", "--days", "9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("9") && (text.contains("range") || text.contains("invalid")),
        "Expected range error in output:\n{text}"
    );
}

#[test]
fn test_content_filter_requires_tag() {
    let output = meraki_cmd()
        .args(["content-filter", "-o", "Acme"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("--tag") || text.contains("required"),
        "Expected tag requirement in output:\n{text}"
    );
}

// ── Global flags ────────────────────────────────────────────────────

#[test]
fn test_global_flags_parse() {
    // All flags should parse; the failure must be about the missing API
    // key, not argument parsing.
    let output = meraki_cmd()
        .args([
            "--timeout",
            "30",
            "--concurrency",
            "10",
            "--max-retries",
            "5",
            "-v",
            "health-alerts",
            "-o",
            "Acme",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    meraki_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    meraki_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = meraki_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("invalid") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}
