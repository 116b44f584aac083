//! Paint and erase commands for single cells.

use crate::cli::common::{load_config, load_project, save_project, CliError, CliResult};
use crate::config::Config;
use crate::models::{parse_frame_number, RgbColor};
use crate::services::EditorSession;
use clap::{ArgGroup, Args};
use std::path::{Path, PathBuf};

/// Paint one cell of a frame
#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("brush").required(true).args(["color", "slot"])))]
pub struct PaintArgs {
    /// Path to project file
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Frame number (1-based)
    #[arg(short, long, value_name = "N")]
    pub frame: String,

    /// Row (0-based)
    #[arg(long)]
    pub row: usize,

    /// Column (0-based)
    #[arg(long)]
    pub col: usize,

    /// Brush color as #RRGGBB
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,

    /// Brush color from a palette slot (0-7)
    #[arg(long)]
    pub slot: Option<usize>,
}

/// Erase one cell of a frame back to black
#[derive(Debug, Clone, Args)]
pub struct EraseArgs {
    /// Path to project file
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Frame number (1-based)
    #[arg(short, long, value_name = "N")]
    pub frame: String,

    /// Row (0-based)
    #[arg(long)]
    pub row: usize,

    /// Column (0-based)
    #[arg(long)]
    pub col: usize,
}

impl PaintArgs {
    /// Execute the paint command
    pub fn execute(&self) -> CliResult<()> {
        self.run(&load_config())
    }

    /// Runs the command with an already loaded configuration.
    pub fn run(&self, config: &Config) -> CliResult<()> {
        let mut session = open_at_frame(&self.project, &self.frame, config)?;

        let color = match (&self.color, self.slot) {
            (Some(hex), _) => {
                let color = RgbColor::from_hex(hex)
                    .map_err(|e| CliError::validation(format!("Invalid color: {e}")))?;
                session.set_brush(color);
                color
            }
            (None, Some(slot)) => session.select_color(slot)?,
            (None, None) => return Err(CliError::validation("Specify --color or --slot")),
        };

        if !session.paint(self.row, self.col) {
            return Err(outside_grid(&session, self.row, self.col));
        }
        save_project(&session, &self.project)?;

        println!(
            "✓ Painted ({}, {}) in frame {} with {}",
            self.row,
            self.col,
            self.frame.trim(),
            color
        );
        Ok(())
    }
}

impl EraseArgs {
    /// Execute the erase command
    pub fn execute(&self) -> CliResult<()> {
        self.run(&load_config())
    }

    /// Runs the command with an already loaded configuration.
    pub fn run(&self, config: &Config) -> CliResult<()> {
        let mut session = open_at_frame(&self.project, &self.frame, config)?;

        if !session.erase(self.row, self.col) {
            return Err(outside_grid(&session, self.row, self.col));
        }
        save_project(&session, &self.project)?;

        println!(
            "✓ Erased ({}, {}) in frame {}",
            self.row,
            self.col,
            self.frame.trim()
        );
        Ok(())
    }
}

/// Loads the project and makes `frame` current.
fn open_at_frame(project: &Path, frame: &str, config: &Config) -> CliResult<EditorSession> {
    let number = parse_frame_number(frame)?;
    let mut session = load_project(project, config)?;
    session.animation_mut().goto_frame(number)?;
    Ok(session)
}

fn outside_grid(session: &EditorSession, row: usize, col: usize) -> CliError {
    let (rows, cols) = session.animation().dimensions();
    CliError::validation(format!(
        "Cell ({row}, {col}) is outside the {rows}x{cols} grid"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::common::CliErrorKind;
    use crate::services::ProjectService;
    use tempfile::TempDir;

    fn project(temp_dir: &TempDir) -> PathBuf {
        let path = temp_dir.path().join("p.json");
        let mut session = EditorSession::new(2, 2, 150).unwrap();
        session.animation_mut().next_frame();
        ProjectService::save(&session, &path).unwrap();
        path
    }

    fn reload(path: &Path) -> EditorSession {
        ProjectService::load(path, Config::new().editor.default_speed_ms).unwrap()
    }

    #[test]
    fn test_paint_with_hex_and_slot() {
        let temp_dir = TempDir::new().unwrap();
        let path = project(&temp_dir);

        PaintArgs {
            project: path.clone(),
            frame: "2".to_string(),
            row: 1,
            col: 0,
            color: Some("#00ff00".to_string()),
            slot: None,
        }
        .run(&Config::new())
        .unwrap();

        PaintArgs {
            project: path.clone(),
            frame: "1".to_string(),
            row: 0,
            col: 1,
            color: None,
            slot: Some(4),
        }
        .run(&Config::new())
        .unwrap();

        let session = reload(&path);
        let frames = session.animation().frames();
        assert_eq!(frames[1].get(1, 0), Some(RgbColor::new(0, 255, 0)));
        assert_eq!(frames[0].get(0, 1), Some(RgbColor::new(0, 0, 255)));
        assert_eq!(frames[0].painted_cells(), 1);
    }

    #[test]
    fn test_erase() {
        let temp_dir = TempDir::new().unwrap();
        let path = project(&temp_dir);

        PaintArgs {
            project: path.clone(),
            frame: "1".to_string(),
            row: 0,
            col: 0,
            color: Some("#FFFFFF".to_string()),
            slot: None,
        }
        .run(&Config::new())
        .unwrap();
        EraseArgs {
            project: path.clone(),
            frame: "1".to_string(),
            row: 0,
            col: 0,
        }
        .run(&Config::new())
        .unwrap();

        assert_eq!(reload(&path).animation().frames()[0].painted_cells(), 0);
    }

    #[test]
    fn test_rejected_edits_leave_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = project(&temp_dir);
        let before = std::fs::read_to_string(&path).unwrap();

        let cases = [
            PaintArgs {
                project: path.clone(),
                frame: "1".to_string(),
                row: 5,
                col: 0,
                color: Some("#FFFFFF".to_string()),
                slot: None,
            },
            PaintArgs {
                project: path.clone(),
                frame: "3".to_string(),
                row: 0,
                col: 0,
                color: Some("#FFFFFF".to_string()),
                slot: None,
            },
            PaintArgs {
                project: path.clone(),
                frame: "one".to_string(),
                row: 0,
                col: 0,
                color: Some("#FFFFFF".to_string()),
                slot: None,
            },
            PaintArgs {
                project: path.clone(),
                frame: "1".to_string(),
                row: 0,
                col: 0,
                color: None,
                slot: Some(8),
            },
            PaintArgs {
                project: path.clone(),
                frame: "1".to_string(),
                row: 0,
                col: 0,
                color: Some("red".to_string()),
                slot: None,
            },
        ];

        for args in cases {
            let err = args.run(&Config::new()).unwrap_err();
            assert_eq!(err.kind, CliErrorKind::Validation, "{}", err.message);
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}
