//! Shared test fixtures for CLI and service tests.
#![allow(dead_code)] // Each test binary uses a different subset

use bubu::models::RgbColor;
use bubu::services::{EditorSession, ProjectService};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Path to the bubu binary
pub fn bubu_bin() -> &'static str {
    env!("CARGO_BIN_EXE_bubu")
}

/// A `bubu` command isolated from the user's config and environment.
pub fn bubu_command(temp_dir: &TempDir) -> Command {
    let mut command = Command::new(bubu_bin());
    command
        .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env("HOME", temp_dir.path())
        .env_remove("METROLINX_API_KEY");
    command
}

/// Creates a two-frame 2x3 session.
///
/// Frame 1 has red at (0, 0) and blue at (1, 2); frame 2 has white at (0, 1).
pub fn test_session() -> EditorSession {
    let mut session = EditorSession::new(2, 3, 120).unwrap();
    session.set_brush(RgbColor::new(255, 0, 0));
    session.paint(0, 0);
    session.set_brush(RgbColor::new(0, 0, 255));
    session.paint(1, 2);
    session.animation_mut().next_frame();
    session.set_brush(RgbColor::WHITE);
    session.paint(0, 1);
    session
}

/// Writes a session to `dir/name`.
pub fn write_project(dir: &Path, name: &str, session: &EditorSession) -> PathBuf {
    let path = dir.join(name);
    ProjectService::save(session, &path).expect("Failed to write project");
    path
}

/// Creates a temp dir holding [`test_session`] as `walk.json`.
pub fn create_temp_project() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_project(temp_dir.path(), "walk.json", &test_session());
    (path, temp_dir)
}

/// Writes a JSON value to `dir/name`.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).expect("Failed to write JSON");
    path
}

/// A provider response shaped like the real one: `AllDepartures` maps
/// opaque keys to a list of trips and a single trip, plus noise.
pub fn provider_response() -> Value {
    json!({
        "Metadata": {"TimeStamp": "2024-05-01 07:55:12", "ErrorCode": "200"},
        "AllDepartures": {
            "Trip": [
                {
                    "Service": "LW",
                    "ServiceType": "T",
                    "Platform": "9 & 10",
                    "Info": "Proceed",
                    "Time": "2024-05-01 08:10:00",
                    "Stops": [{"Name": "Exhibition"}, {"Name": "Aldershot GO"}]
                },
                {
                    "Service": "ST",
                    "Platform": "-",
                    "Info": "Wait",
                    "Time": "2024-05-01 08:20:00",
                    "Stops": [{"Name": "Kennedy GO"}, {"Name": "Mount Joy GO"}]
                },
                {"Service": "BR", "Info": "Cancelled", "Stops": []},
                "noise"
            ],
            "Express": {
                "Service": "LE",
                "Platform": "4",
                "Info": null,
                "Time": "2024-05-01 08:05:00",
                "Stops": [{"Name": "Oshawa GO"}]
            },
            "Count": 3
        }
    })
}
