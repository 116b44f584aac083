//! Inspect command for summarizing a project.

use crate::cli::common::{load_config, load_project, CliError, CliResult};
use crate::config::Config;
use crate::models::RgbColor;
use crate::services::EditorSession;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Summarize a project: grid size, frames, speed and palette
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to project file
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Project summary as printed with `--json`.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Number of frames.
    pub frame_count: usize,
    /// Playback delay.
    pub speed_ms: u32,
    /// Palette slots in order.
    pub palette: Vec<PaletteEntry>,
    /// Per-frame statistics.
    pub frames: Vec<FrameSummary>,
}

/// One palette slot.
#[derive(Debug, Serialize)]
pub struct PaletteEntry {
    /// Slot index.
    pub slot: usize,
    /// `#RRGGBB`.
    pub hex: String,
    /// Packed value, `0xXXXX`.
    pub rgb565: String,
    /// The packed value expanded back to `#RRGGBB`, i.e. what the display shows.
    pub on_device: String,
}

/// Statistics for one frame.
#[derive(Debug, Serialize)]
pub struct FrameSummary {
    /// 1-based frame number.
    pub number: usize,
    /// Cells that are not black.
    pub painted_cells: usize,
}

impl ProjectSummary {
    /// Builds the summary for a loaded session.
    #[must_use]
    pub fn from_session(session: &EditorSession) -> Self {
        let animation = session.animation();
        let (rows, cols) = animation.dimensions();

        Self {
            rows,
            cols,
            frame_count: animation.len(),
            speed_ms: animation.speed_ms(),
            palette: session
                .palette()
                .colors()
                .iter()
                .enumerate()
                .map(|(slot, color)| {
                    let packed = color.to_rgb565();
                    PaletteEntry {
                        slot,
                        hex: color.to_hex(),
                        rgb565: format!("0x{packed:04X}"),
                        on_device: RgbColor::from_rgb565(packed).to_hex(),
                    }
                })
                .collect(),
            frames: animation
                .frames()
                .iter()
                .enumerate()
                .map(|(i, frame)| FrameSummary {
                    number: i + 1,
                    painted_cells: frame.painted_cells(),
                })
                .collect(),
        }
    }
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        self.run(&load_config())
    }

    /// Runs the command with an already loaded configuration.
    pub fn run(&self, config: &Config) -> CliResult<()> {
        let session = load_project(&self.project, config)?;
        let summary = ProjectSummary::from_session(&session);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        println!("Project: {}", self.project.display());
        println!("  Grid:   {} x {}", summary.rows, summary.cols);
        println!("  Frames: {}", summary.frame_count);
        println!("  Speed:  {} ms", summary.speed_ms);

        println!("\nPalette:");
        for entry in &summary.palette {
            println!(
                "  [{}] {} ({}, shown as {})",
                entry.slot, entry.hex, entry.rgb565, entry.on_device
            );
        }

        println!("\nPainted cells:");
        for frame in &summary.frames {
            println!("  Frame {}: {}", frame.number, frame.painted_cells);
        }

        Ok(())
    }
}
