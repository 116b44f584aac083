//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};

const REDACTED: &str = "********";

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Default grid rows for new projects
    #[arg(long)]
    rows: Option<usize>,

    /// Default grid columns for new projects
    #[arg(long)]
    cols: Option<usize>,

    /// Default playback delay in milliseconds
    #[arg(long, value_name = "MS")]
    speed: Option<u32>,

    /// Values per line in exported headers
    #[arg(long, value_name = "N")]
    values_per_line: Option<usize>,

    /// Departure provider endpoint
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Provider API key (METROLINX_API_KEY still wins when set)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Departures returned when no limit is given
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Drop departures with unreadable times instead of failing
    #[arg(long, value_name = "BOOL")]
    skip_invalid_times: Option<bool>,

    /// Address the transit service binds to
    #[arg(long)]
    host: Option<String>,

    /// Port the transit service listens on
    #[arg(long)]
    port: Option<u16>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            let json = serde_json::to_string_pretty(&redacted(&config)).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            output_human_readable(&config);
        }
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = Config::load().unwrap_or_default();
        if self.apply(&mut config) == 0 {
            return Err(CliError::validation(
                "At least one setting must be given, see `config set --help`",
            ));
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("✓ Configuration updated");
        Ok(())
    }

    /// Copies every given option into `config`, returning how many were set.
    fn apply(&self, config: &mut Config) -> usize {
        let editor = &mut config.editor;
        let transit = &mut config.transit;
        let server = &mut config.server;

        let mut changed = assign(&mut editor.rows, self.rows.as_ref())
            + assign(&mut editor.cols, self.cols.as_ref())
            + assign(&mut editor.default_speed_ms, self.speed.as_ref())
            + assign(&mut editor.values_per_line, self.values_per_line.as_ref())
            + assign(&mut transit.base_url, self.base_url.as_ref())
            + assign(&mut transit.default_limit, self.limit.as_ref())
            + assign(&mut transit.skip_invalid_times, self.skip_invalid_times.as_ref())
            + assign(&mut server.host, self.host.as_ref())
            + assign(&mut server.port, self.port.as_ref());

        if let Some(key) = &self.api_key {
            transit.api_key = Some(key.clone());
            changed += 1;
        }
        changed
    }
}

fn assign<T: Clone>(slot: &mut T, value: Option<&T>) -> usize {
    value.map_or(0, |value| {
        slot.clone_from(value);
        1
    })
}

/// Copy of `config` safe to print.
fn redacted(config: &Config) -> Config {
    let mut shown = config.clone();
    if shown.transit.api_key.is_some() {
        shown.transit.api_key = Some(REDACTED.to_string());
    }
    shown
}

fn output_human_readable(config: &Config) {
    println!("Bubu Configuration");
    println!("==================");
    match Config::config_file_path() {
        Ok(path) => println!("File: {}", path.display()),
        Err(_) => println!("File: (no config directory)"),
    }
    println!();

    let editor = &config.editor;
    println!("Editor:");
    println!("  Grid:            {} x {}", editor.rows, editor.cols);
    println!("  Speed:           {} ms", editor.default_speed_ms);
    println!("  Values per line: {}", editor.values_per_line);
    println!();

    let transit = &config.transit;
    println!("Transit:");
    println!("  Base URL:        {}", transit.base_url);
    println!(
        "  API key:         {}",
        if transit.resolved_api_key().is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!("  Timeout:         {} s", transit.timeout_secs);
    println!("  Default limit:   {}", transit.default_limit);
    println!("  Invalid times:   {:?}", transit.time_policy());
    println!();

    println!("Server:");
    println!("  Address:         {}:{}", config.server.host, config.server.port);
}
