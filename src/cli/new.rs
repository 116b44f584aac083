//! New command for creating a blank project.

use crate::cli::common::{load_config, save_project, CliResult};
use crate::config::Config;
use crate::services::EditorSession;
use clap::Args;
use std::path::PathBuf;

/// Create a blank animation project
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Path of the project file to create
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Grid rows (defaults to editor.rows from config)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Grid columns (defaults to editor.cols from config)
    #[arg(long)]
    pub cols: Option<usize>,

    /// Playback delay in milliseconds, clamped to 50..=1000
    #[arg(long, value_name = "MS")]
    pub speed: Option<u32>,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        self.run(&load_config())
    }

    /// Runs the command with an already loaded configuration.
    pub fn run(&self, config: &Config) -> CliResult<()> {
        let rows = self.rows.unwrap_or(config.editor.rows);
        let cols = self.cols.unwrap_or(config.editor.cols);
        let speed = self.speed.unwrap_or(config.editor.default_speed_ms);

        let session = EditorSession::new(rows, cols, speed)?;
        save_project(&session, &self.output)?;

        println!(
            "✓ Created {}x{} project at {} ({} ms per frame)",
            rows,
            cols,
            self.output.display(),
            session.animation().speed_ms()
        );
        Ok(())
    }
}
