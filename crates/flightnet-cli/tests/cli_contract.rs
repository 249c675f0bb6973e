use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

const TWO_CYCLES: &str = "T0T1T2T5T7T8T11T0T1T3T4T6T9T10T11";

fn flightnet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flightnet"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute flightnet")
}

fn flightnet_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flightnet-sim"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute flightnet-sim")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn accepted_trace_from_argument() {
    let output = flightnet(&[TWO_CYCLES]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Test finished OK"));
    assert!(out.contains("Invariant count: 2"));
}

#[test]
fn rejected_trace_is_not_a_process_failure() {
    let output = flightnet(&["T0"]);
    assert!(output.status.success(), "reject must exit 0");
    assert!(stdout(&output).contains("Test finished FAIL: leftover transitions"));
}

#[test]
fn trace_read_from_stdin_after_prompt() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_flightnet"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn flightnet");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(format!("{TWO_CYCLES}\n").as_bytes())
        .expect("failed to write trace");
    let output = child.wait_with_output().expect("flightnet did not finish");

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Enter the transition sequence: "));
    assert!(out.contains("Invariant count: 2"));
}

#[test]
fn json_output_parses() {
    let output = flightnet(&["--format", "json", "--tally", TWO_CYCLES]);
    assert!(output.status.success());
    let value: Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(value["cycles"], 2);
    assert_eq!(value["verdict"]["status"], "accepted");
    assert!(value.get("tally").is_some());
}

#[test]
fn iteration_cap_is_fatal() {
    let output = flightnet(&["--max-iterations", "1", TWO_CYCLES]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bound of 1 iterations"), "{stderr}");
}

#[test]
fn grammar_dump_is_json() {
    let output = flightnet(&["--dump-grammar"]);
    assert!(output.status.success());
    let value: Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(value["name"], "flight_booking");
    assert_eq!(value["segments"].as_array().map(Vec::len), Some(5));
}

#[test]
fn simulator_is_deterministic_per_seed() {
    let args = ["--seed", "42", "--clients", "8"];
    let first = flightnet_sim(&args);
    let second = flightnet_sim(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(stdout(&first).starts_with("T0"));
}

#[test]
fn simulated_trace_analyzes_cleanly() {
    let output = flightnet_sim(&["--seed", "7", "--clients", "5", "--policy", "1", "--analyze"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Test finished OK"));
    assert!(out.contains("Invariant count: 5"));
    assert!(out.contains("T11 (left): 5"));
}

#[test]
fn simulator_json_output() {
    let output = flightnet_sim(&["--seed", "3", "--clients", "4", "--format", "json"]);
    assert!(output.status.success());
    let value: Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(value["customers"], 4);
    assert_eq!(value["customers_left"], 4);
    assert_eq!(value["stop"], "all_customers_left");
    assert!(value.get("report").is_none());
}

#[test]
fn unknown_policy_is_rejected() {
    let output = flightnet_sim(&["--policy", "3"]);
    assert!(!output.status.success());
}
