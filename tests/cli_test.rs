//! CLI integration tests
//!
//! Runs the txlens binary for the paths that fail before any network access
//! and checks the exit code of each.

use assert_cmd::Command;
use predicates::prelude::*;

const HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

fn txlens() -> Command {
    let mut cmd = Command::cargo_bin("txlens").unwrap();
    // Keep a user config file or endpoint from leaking into the run
    cmd.env("TXLENS_CONFIG", "/nonexistent/txlens/config.toml")
        .env_remove("ETHEREUM_RPC")
        .env_remove("ETHERSCAN_API_URL")
        .env_remove("ETHERSCAN_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    txlens()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ETHERSCAN_API_KEY"));
}

#[test]
fn test_missing_arguments_exit_1() {
    txlens()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_flag_exit_1() {
    txlens()
        .args(["ethereum", HASH, "--frobnicate"])
        .assert()
        .code(1);
}

#[test]
fn test_malformed_hash_exit_1() {
    txlens()
        .args(["ethereum", "0xzz"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a transaction hash"));
}

#[test]
fn test_unknown_network_exit_2() {
    txlens()
        .args(["Solana", HASH])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Solana").and(predicate::str::contains("Ethereum")));
}

#[test]
fn test_network_name_is_case_insensitive() {
    // Resolves, then stops at the missing RPC endpoint
    txlens()
        .args(["ETHEREUM", HASH])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("no RPC endpoint configured for Ethereum"));
}

#[test]
fn test_zero_timeout_exit_1() {
    txlens()
        .args(["ethereum", HASH, "--timeout", "0"])
        .assert()
        .code(1);
}
