//! Face command for generating a full-resolution face bitmap.

use crate::cli::common::{load_config, load_project, parse_optional_frame, write_output, CliResult};
use crate::config::Config;
use crate::export;
use clap::Args;
use std::path::PathBuf;

/// Expand one frame to display resolution and write face.h
#[derive(Debug, Clone, Args)]
pub struct FaceArgs {
    /// Path to project file
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Output path for the header file
    #[arg(short, long, value_name = "FILE.h")]
    pub output: PathBuf,

    /// Frame to export, 1-based
    #[arg(short, long, value_name = "N")]
    pub frame: Option<String>,

    /// Physical pixels per grid cell, in each direction
    #[arg(short, long, default_value_t = 3)]
    pub block: usize,
}

impl FaceArgs {
    /// Execute the face command
    pub fn execute(&self) -> CliResult<()> {
        self.run(&load_config())
    }

    /// Runs the command with an already loaded configuration.
    pub fn run(&self, config: &Config) -> CliResult<()> {
        let number = parse_optional_frame(self.frame.as_deref())?.unwrap_or(1);
        let session = load_project(&self.project, config)?;
        let frame = session.animation().frame(number)?;

        let header = export::generate_face_header(frame, self.block)?;
        write_output(&self.output, &header)?;

        println!(
            "✓ Exported frame {} at {}x{} to: {}",
            number,
            frame.cols() * self.block,
            frame.rows() * self.block,
            self.output.display()
        );
        Ok(())
    }
}
