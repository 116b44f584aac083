//! End-to-end tests for `bubu departures`.

use serde_json::{json, Value};
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

fn run(temp_dir: &TempDir, args: &[&str]) -> std::process::Output {
    bubu_command(temp_dir)
        .arg("departures")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_departures_sorted_and_filtered() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_json(temp_dir.path(), "union.json", &provider_response());

    let output = run(&temp_dir, &["--input", input.to_str().unwrap()]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let departures: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        departures,
        json!([
            {
                "line": "LE",
                "destination": "Oshawa GO",
                "time": "2024-05-01 08:05:00",
                "platform": "4",
                "status": null
            },
            {
                "line": "LW",
                "destination": "Aldershot GO",
                "time": "2024-05-01 08:10:00",
                "platform": "9 & 10",
                "status": "Proceed"
            },
            {
                "line": "ST",
                "destination": "Mount Joy GO",
                "time": "2024-05-01 08:20:00",
                "platform": "-",
                "status": "Wait"
            }
        ])
    );
}

#[test]
fn test_departures_limit() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_json(temp_dir.path(), "union.json", &provider_response());

    let output = run(&temp_dir, &["--input", input.to_str().unwrap(), "--limit", "1"]);
    let departures: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(departures.as_array().unwrap().len(), 1);
    assert_eq!(departures[0]["line"], "LE");

    let output = run(&temp_dir, &["--input", input.to_str().unwrap(), "--limit", "0"]);
    let departures: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(departures, json!([]));
}

#[test]
fn test_departures_invalid_time_policy() {
    let temp_dir = TempDir::new().unwrap();
    let payload = json!({"AllDepartures": [
        {"Service": "LW", "Time": "2024-05-01 08:10:00", "Stops": []},
        {"Service": "LE", "Time": "8:05 AM", "Stops": []}
    ]});
    let input = write_json(temp_dir.path(), "bad_time.json", &payload);

    let output = run(&temp_dir, &["--input", input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("8:05 AM"));

    let output = run(
        &temp_dir,
        &["--input", input.to_str().unwrap(), "--skip-invalid-times"],
    );
    assert_eq!(output.status.code(), Some(0));
    let departures: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(departures.as_array().unwrap().len(), 1);
    assert_eq!(departures[0]["line"], "LW");
}

#[test]
fn test_departures_bad_input() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        &temp_dir,
        &["--input", temp_dir.path().join("missing.json").to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(2));

    let not_json = temp_dir.path().join("not.json");
    std::fs::write(&not_json, "<html>").unwrap();
    let output = run(&temp_dir, &["--input", not_json.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}
