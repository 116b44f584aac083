//! Departures command: normalize a saved provider response.

use crate::cli::common::{load_config, CliError, CliResult};
use crate::config::Config;
use crate::transit::{all_departures, normalize_departures, Departure, TimePolicy};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Normalize departures from a saved provider response and print JSON
#[derive(Debug, Clone, Args)]
pub struct DeparturesArgs {
    /// Provider response (or its AllDepartures value) as JSON
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Maximum departures to print (defaults to transit.default_limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Drop departures with unparseable times instead of failing
    #[arg(long)]
    pub skip_invalid_times: bool,
}

impl DeparturesArgs {
    /// Execute the departures command
    pub fn execute(&self) -> CliResult<()> {
        self.run(&load_config())
    }

    /// Runs the command with an already loaded configuration.
    pub fn run(&self, config: &Config) -> CliResult<()> {

        let content = fs::read_to_string(&self.input).map_err(|e| {
            CliError::io(format!("Failed to read {}: {e}", self.input.display()))
        })?;
        let payload: Value = serde_json::from_str(&content)
            .map_err(|e| CliError::validation(format!("Input is not valid JSON: {e}")))?;

        let limit = self.limit.unwrap_or(config.transit.default_limit);
        let policy = if self.skip_invalid_times {
            TimePolicy::Skip
        } else {
            config.transit.time_policy()
        };

        let departures = normalize_payload(&payload, limit, policy)?;
        println!(
            "{}",
            serde_json::to_string_pretty(&departures)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
        );
        Ok(())
    }
}

/// Accepts either a whole provider response or just its `AllDepartures`.
fn normalize_payload(
    payload: &Value,
    limit: usize,
    policy: TimePolicy,
) -> CliResult<Vec<Departure>> {
    let raw = if payload.get("AllDepartures").is_some() {
        all_departures(payload)
    } else {
        payload
    };
    Ok(normalize_departures(raw, limit, policy)?)
}
