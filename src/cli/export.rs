//! Export command for generating the animation header.

use crate::cli::common::{load_config, load_project, write_output, CliResult};
use crate::config::Config;
use crate::export::{self, LineWrap};
use clap::Args;
use std::path::PathBuf;

/// Export all frames as a PROGMEM animation header
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Path to project file
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Output path for the header file
    #[arg(short, long, value_name = "FILE.h")]
    pub output: PathBuf,

    /// Array name prefix (defaults to the output file name)
    #[arg(long, value_name = "SYMBOL")]
    pub name: Option<String>,

    /// Values per line (defaults to editor.values_per_line from config)
    #[arg(long, value_name = "N", conflicts_with = "grid_rows")]
    pub values_per_line: Option<usize>,

    /// Write one grid row per line
    #[arg(long)]
    pub grid_rows: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        self.run(&load_config())
    }

    /// Runs the command with an already loaded configuration.
    pub fn run(&self, config: &Config) -> CliResult<()> {
        let session = load_project(&self.project, config)?;

        let symbol = match &self.name {
            Some(name) => {
                export::validate_symbol(name)?;
                name.clone()
            }
            None => export::symbol_from_path(&self.output)?,
        };

        let wrap = self.line_wrap(config.editor.values_per_line);
        let header = export::generate_animation_header(session.animation(), &symbol, wrap)?;
        write_output(&self.output, &header)?;

        println!(
            "✓ Exported {} frames as '{}' to: {}",
            session.animation().len(),
            symbol,
            self.output.display()
        );
        Ok(())
    }

    fn line_wrap(&self, configured: usize) -> LineWrap {
        if self.grid_rows {
            LineWrap::GridRows
        } else {
            LineWrap::Fixed(self.values_per_line.unwrap_or(configured))
        }
    }
}
