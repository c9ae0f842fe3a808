//! Integration tests for CLI commands.

use std::fs;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const ADMIN: &str = "0x0000000000000000000000000000000000000000";
const SURVEYOR: &str = "0x0000000000000000000000000000000000000001";
const APPLE: &str = "0x0000000000000000000000000000000000000002";
const OTHER_SURVEYOR: &str = "0x0000000000000000000000000000000000000003";
const MICROSOFT: &str = "0x0000000000000000000000000000000000000004";

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_carbonreg"))
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

fn run_ok(args: &[&str]) -> String {
    let (success, stdout, stderr) = run_cli(args);
    assert!(success, "{:?} failed: {}", args, stderr);
    stdout
}

fn register_company(journal: &str, company: &str, name: &str, quantity: &str) {
    run_ok(&[
        "register-company",
        journal,
        "--from",
        ADMIN,
        "--address",
        company,
        "--name",
        name,
        "--score",
        "7",
        "--quantity",
        quantity,
        "--registration-id",
        "R9887EAUX",
        "--surveyor",
        SURVEYOR,
    ]);
}

/// Surveyor, Apple (reserve 2) and Microsoft (reserve 5), both verified.
fn create_test_journal() -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let journal = temp_dir
        .path()
        .join("registry.crj")
        .to_string_lossy()
        .to_string();

    run_ok(&[
        "register-surveyor",
        &journal,
        "--from",
        ADMIN,
        "--address",
        SURVEYOR,
        "--name",
        "Greener",
    ]);
    register_company(&journal, APPLE, "Apple", "2");
    register_company(&journal, MICROSOFT, "Microsoft", "5");
    run_ok(&["approve", &journal, "--from", SURVEYOR, "--company", APPLE]);
    run_ok(&["approve", &journal, "--from", SURVEYOR, "--company", MICROSOFT]);

    (temp_dir, journal)
}

fn tokens(journal: &str, owner: &str) -> serde_json::Value {
    let stdout = run_ok(&["tokens", journal, "--owner", owner, "--json"]);
    serde_json::from_str(&stdout).unwrap()
}

#[test]
fn test_registration_flow() {
    let (_temp_dir, journal) = create_test_journal();

    let stdout = run_ok(&["surveyors", &journal]);
    assert!(stdout.contains(SURVEYOR));
    assert!(stdout.contains("Greener"));

    let apple = tokens(&journal, APPLE);
    assert_eq!(apple["units"].as_array().unwrap().len(), 5);
    assert_eq!(apple["surplus"], 3);

    let stdout = run_ok(&["pending", &journal, "--surveyor", SURVEYOR, "--json"]);
    let pending: Vec<String> = serde_json::from_str(&stdout).unwrap();
    assert!(pending.is_empty());
}

#[test]
fn test_pending_lists_queued_companies() {
    let temp_dir = TempDir::new().unwrap();
    let journal = temp_dir.path().join("q.crj").to_string_lossy().to_string();
    register_company(&journal, APPLE, "Apple", "2");

    let stdout = run_ok(&["pending", &journal, "--surveyor", SURVEYOR]);
    assert_eq!(stdout.trim(), APPLE);
}

#[test]
fn test_request_and_transfer() {
    let (_temp_dir, journal) = create_test_journal();

    run_ok(&[
        "request", &journal, "--from", MICROSOFT, "--amount", "1", "--payment", "4750",
    ]);
    let stdout = run_ok(&["requests", &journal, "--company", MICROSOFT, "--json"]);
    let requests: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(requests["requests"][0]["amount"], 1);
    assert_eq!(requests["requests"][0]["payment"], 4750);
    assert_eq!(requests["requests_remaining"], 4);

    let stdout = run_ok(&[
        "transfer", &journal, "--from", APPLE, "--requester", MICROSOFT, "--amount", "1",
        "--price", "475", "--json",
    ]);
    let applied: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(applied["sequence"], 7);
    assert_eq!(applied["receipt"]["effect"], "credits_transferred");

    assert_eq!(tokens(&journal, APPLE)["units"].as_array().unwrap().len(), 4);
    assert_eq!(tokens(&journal, MICROSOFT)["units"].as_array().unwrap().len(), 6);
    let stdout = run_ok(&["requests", &journal, "--company", MICROSOFT, "--json"]);
    let requests: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(requests["requests"].as_array().unwrap().is_empty());
}

#[test]
fn test_rejected_call_is_not_journaled() {
    let (_temp_dir, journal) = create_test_journal();
    let before = fs::read(&journal).unwrap();

    let (success, _, stderr) = run_cli(&[
        "approve",
        &journal,
        "--from",
        OTHER_SURVEYOR,
        "--company",
        APPLE,
    ]);

    assert!(!success);
    assert!(stderr.contains("Error: Only relevant surveyor can perform this action"));
    assert_eq!(fs::read(&journal).unwrap(), before);
}

#[test]
fn test_surplus_violation_reported() {
    let (_temp_dir, journal) = create_test_journal();
    run_ok(&["request", &journal, "--from", MICROSOFT, "--amount", "4"]);

    let (success, _, stderr) = run_cli(&[
        "transfer", &journal, "--from", APPLE, "--requester", MICROSOFT, "--amount", "4",
    ]);

    assert!(!success);
    assert!(stderr.contains("Only available credits can be transferred"));
}

#[test]
fn test_quota_exhaustion() {
    let (_temp_dir, journal) = create_test_journal();
    for _ in 0..5 {
        run_ok(&["request", &journal, "--from", MICROSOFT, "--amount", "1"]);
    }

    let (success, _, stderr) = run_cli(&["request", &journal, "--from", MICROSOFT, "--amount", "1"]);

    assert!(!success);
    assert!(stderr.contains("You do not have enough requests remaining"));
}

#[test]
fn test_concurrent_requests_respect_quota() {
    let (_temp_dir, journal) = create_test_journal();

    let children: Vec<_> = (0..8)
        .map(|_| {
            Command::new(env!("CARGO_BIN_EXE_carbonreg"))
                .args(["request", &journal, "--from", MICROSOFT, "--amount", "1"])
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .expect("Failed to spawn CLI")
        })
        .collect();
    let outputs: Vec<_> = children
        .into_iter()
        .map(|child| child.wait_with_output().unwrap())
        .collect();

    let accepted = outputs.iter().filter(|o| o.status.success()).count();
    assert_eq!(accepted, 5);
    for output in outputs.iter().filter(|o| !o.status.success()) {
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("You do not have enough requests remaining"), "{}", stderr);
    }

    let stdout = run_ok(&["requests", &journal, "--company", MICROSOFT, "--json"]);
    let requests: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(requests["requests"].as_array().unwrap().len(), 5);

    let stdout = run_ok(&["verify", &journal, "--strict", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let sequences: Vec<u64> = report["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["sequence"].as_u64().unwrap())
        .collect();
    assert_eq!(sequences, (1..=10).collect::<Vec<u64>>());
}

#[test]
fn test_company_command() {
    let (_temp_dir, journal) = create_test_journal();

    let stdout = run_ok(&["company", &journal, APPLE, "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["company"]["name"], "Apple");
    assert_eq!(parsed["company"]["status"], "verified");
    assert_eq!(parsed["units"], 5);

    let (success, _, stderr) = run_cli(&["company", &journal, OTHER_SURVEYOR]);
    assert!(!success);
    assert!(stderr.contains("is not registered"));
}

#[test]
fn test_history_command() {
    let (_temp_dir, journal) = create_test_journal();

    let stdout = run_ok(&["history", &journal]);
    assert!(stdout.contains("RECORDED_AT"));
    assert!(stdout.contains("approve_credit_info"));

    let stdout = run_ok(&["history", &journal, "--json", "--max-records", "2"]);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["sequence"], 1);
    assert_eq!(first["call"]["op"], "register_surveyor");
}

#[test]
fn test_verify_command() {
    let (_temp_dir, journal) = create_test_journal();

    let stdout = run_ok(&["verify", &journal, "--strict"]);
    assert!(stdout.contains("state digest: sha-256:"));
    assert!(!stdout.contains("INVALID"));

    let stdout = run_ok(&["verify", &journal, "--json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["records"].as_array().unwrap().len(), 5);
}

#[test]
fn test_verify_detects_tampering() {
    let (_temp_dir, journal) = create_test_journal();

    // "Greener" -> "Greenes" inside the first record's payload
    let mut bytes = fs::read(&journal).unwrap();
    let pos = bytes
        .windows(7)
        .position(|w| w == b"Greener")
        .unwrap();
    bytes[pos + 6] = b's';
    fs::write(&journal, &bytes).unwrap();

    let (success, stdout, stderr) = run_cli(&["verify", &journal, "--strict"]);
    assert!(!success);
    assert!(stdout.contains("INVALID"));
    assert!(stderr.contains("failed verification"));

    let (success, _, stderr) = run_cli(&["surveyors", &journal]);
    assert!(!success);
    assert!(stderr.contains("record 1"));
}

#[test]
fn test_administrator_config() {
    let temp_dir = TempDir::new().unwrap();
    let journal = temp_dir.path().join("admin.crj").to_string_lossy().to_string();
    let config = temp_dir.path().join("config.json");
    fs::write(&config, format!(r#"{{"administrator": "{}"}}"#, ADMIN)).unwrap();
    let config = config.to_string_lossy().to_string();

    let (success, _, stderr) = run_cli(&[
        "--config", &config, "register-surveyor", &journal, "--from", APPLE, "--address",
        SURVEYOR, "--name", "Greener",
    ]);
    assert!(!success);
    assert!(stderr.contains("administrator"));

    run_ok(&[
        "register-surveyor", &journal, "--config", &config, "--from", ADMIN, "--address",
        SURVEYOR, "--name", "Greener",
    ]);
}

#[test]
fn test_oversized_allocation_config_refused() {
    let temp_dir = TempDir::new().unwrap();
    let journal = temp_dir.path().join("alloc.crj").to_string_lossy().to_string();
    let config = temp_dir.path().join("config.json");
    fs::write(&config, r#"{"base_allocation": 18446744073709551615}"#).unwrap();
    let config = config.to_string_lossy().to_string();

    let (success, _, stderr) = run_cli(&[
        "--config", &config, "register-surveyor", &journal, "--from", ADMIN, "--address",
        SURVEYOR, "--name", "Greener",
    ]);

    assert!(!success);
    assert!(stderr.contains("base_allocation"));
    assert!(fs::metadata(&journal).is_err());
}

#[test]
fn test_invalid_address_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let journal = temp_dir.path().join("x.crj").to_string_lossy().to_string();

    let (success, _, _) = run_cli(&[
        "register-surveyor", &journal, "--from", "0x123", "--address", SURVEYOR, "--name", "G",
    ]);

    assert!(!success);
    assert!(fs::metadata(&journal).is_err());
}

#[test]
fn test_query_on_missing_journal() {
    let temp_dir = TempDir::new().unwrap();
    let journal = temp_dir.path().join("missing.crj").to_string_lossy().to_string();

    let (success, _, stderr) = run_cli(&["surveyors", &journal]);
    assert!(!success);
    assert!(stderr.contains("does not exist"));
}
