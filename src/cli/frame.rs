//! Frame command for adding, cloning and deleting frames.

use crate::cli::common::{
    load_config, load_project, parse_optional_frame, save_project, CliResult,
};
use crate::config::Config;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Frame operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrameOp {
    /// Insert a blank frame after --at
    Add,
    /// Insert a copy of --source after --at
    Clone,
    /// Remove the frame at --at
    Delete,
}

/// Add, clone or delete a frame
#[derive(Debug, Clone, Args)]
pub struct FrameArgs {
    /// Path to project file
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Operation to perform
    #[arg(value_enum)]
    pub op: FrameOp,

    /// Frame to operate at, 1-based (defaults to the last frame)
    #[arg(long, value_name = "N")]
    pub at: Option<String>,

    /// Frame to copy for clone, 1-based (defaults to --at)
    #[arg(long, value_name = "N")]
    pub source: Option<String>,
}

impl FrameArgs {
    /// Execute the frame command
    pub fn execute(&self) -> CliResult<()> {
        self.run(&load_config())
    }

    /// Runs the command with an already loaded configuration.
    pub fn run(&self, config: &Config) -> CliResult<()> {
        let at = parse_optional_frame(self.at.as_deref())?;
        let source = parse_optional_frame(self.source.as_deref())?;

        let mut session = load_project(&self.project, config)?;
        let animation = session.animation_mut();
        let at = at.unwrap_or(animation.len());
        animation.goto_frame(at)?;

        let message = match self.op {
            FrameOp::Add => {
                let index = animation.insert_blank_frame();
                format!("Added blank frame {}", index + 1)
            }
            FrameOp::Clone => {
                let source = source.unwrap_or(at);
                let index = animation.clone_frame(source)?;
                format!("Cloned frame {} to frame {}", source, index + 1)
            }
            FrameOp::Delete => {
                animation.delete_current_frame()?;
                format!("Deleted frame {at}")
            }
        };
        let count = animation.len();

        save_project(&session, &self.project)?;
        println!("✓ {message} ({count} frames)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::common::CliErrorKind;
    use crate::models::RgbColor;
    use crate::services::{EditorSession, ProjectService};
    use std::path::Path;
    use tempfile::TempDir;

    /// Two frames; frame 1 has (0, 0) painted red.
    fn project(temp_dir: &TempDir) -> PathBuf {
        let path = temp_dir.path().join("p.json");
        let mut session = EditorSession::new(2, 2, 150).unwrap();
        session.set_brush(RgbColor::new(255, 0, 0));
        session.paint(0, 0);
        session.animation_mut().next_frame();
        ProjectService::save(&session, &path).unwrap();
        path
    }

    fn reload(path: &Path) -> EditorSession {
        ProjectService::load(path, Config::new().editor.default_speed_ms).unwrap()
    }

    fn args(path: &Path, op: FrameOp, at: Option<&str>, source: Option<&str>) -> FrameArgs {
        FrameArgs {
            project: path.to_path_buf(),
            op,
            at: at.map(str::to_string),
            source: source.map(str::to_string),
        }
    }

    #[test]
    fn test_add_appends_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = project(&temp_dir);
        args(&path, FrameOp::Add, None, None).run(&Config::new()).unwrap();

        let session = reload(&path);
        assert_eq!(session.animation().len(), 3);
        assert_eq!(session.animation().frames()[2].painted_cells(), 0);
    }

    #[test]
    fn test_clone_inserts_after_at() {
        let temp_dir = TempDir::new().unwrap();
        let path = project(&temp_dir);
        args(&path, FrameOp::Clone, Some("1"), None)
            .run(&Config::new())
            .unwrap();

        let session = reload(&path);
        let frames = session.animation().frames();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1], frames[0]);
        assert_eq!(frames[2].painted_cells(), 0);
    }

    #[test]
    fn test_clone_from_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = project(&temp_dir);
        args(&path, FrameOp::Clone, Some("2"), Some("1"))
            .run(&Config::new())
            .unwrap();

        let frames = reload(&path).animation().frames().to_vec();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2], frames[0]);
    }

    #[test]
    fn test_delete_and_last_frame() {
        let temp_dir = TempDir::new().unwrap();
        let path = project(&temp_dir);

        args(&path, FrameOp::Delete, Some("1"), None)
            .run(&Config::new())
            .unwrap();
        let session = reload(&path);
        assert_eq!(session.animation().len(), 1);
        assert_eq!(session.animation().frames()[0].painted_cells(), 0);

        let err = args(&path, FrameOp::Delete, None, None)
            .run(&Config::new())
            .unwrap_err();
        assert_eq!(err.kind, CliErrorKind::Validation);
        assert_eq!(reload(&path).animation().len(), 1);
    }

    #[test]
    fn test_bad_frame_numbers() {
        let temp_dir = TempDir::new().unwrap();
        let path = project(&temp_dir);

        for (at, source) in [(Some("9"), None), (Some("0"), None), (None, Some("x"))] {
            let err = args(&path, FrameOp::Clone, at, source)
                .run(&Config::new())
                .unwrap_err();
            assert_eq!(err.kind, CliErrorKind::Validation);
        }
        assert_eq!(reload(&path).animation().len(), 2);
    }
}
