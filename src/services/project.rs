//! Project file I/O service.
//!
//! A project file is JSON:
//!
//! ```json
//! {"frames": [[["#000000", "..."], ["..."]]], "palette": ["#000000", "..."], "speed": 150}
//! ```
//!
//! Loading is lenient about the palette (padded or truncated to eight
//! slots) and speed (defaulted and clamped), strict about frames.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::{Animation, Frame, Palette, RgbColor};
use crate::services::EditorSession;

/// On-disk shape, read loosely so errors can name the bad cell.
#[derive(Debug, Deserialize)]
struct RawProject {
    frames: Vec<Vec<Vec<String>>>,
    #[serde(default)]
    palette: Option<Vec<String>>,
    #[serde(default)]
    speed: Option<i64>,
}

/// On-disk shape for writing.
#[derive(Debug, Serialize)]
struct ProjectFileRef<'a> {
    frames: &'a [Frame],
    palette: &'a Palette,
    speed: u32,
}

/// Service for reading and writing project files.
pub struct ProjectService;

impl ProjectService {
    /// Loads a project from a JSON file.
    ///
    /// `default_speed_ms` is used when the file has no `speed` field.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, has no
    /// frames, has ragged or mismatched frames, or contains a bad color.
    pub fn load(path: &Path, default_speed_ms: u32) -> Result<EditorSession> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file: {}", path.display()))?;

        Self::parse(&content, default_speed_ms)
            .with_context(|| format!("Failed to load project from {}", path.display()))
    }

    /// Parses project JSON text.
    ///
    /// # Errors
    ///
    /// See [`ProjectService::load`].
    pub fn parse(content: &str, default_speed_ms: u32) -> Result<EditorSession> {
        let raw: RawProject =
            serde_json::from_str(content).context("Project file is not valid JSON")?;

        let mut frames = Vec::with_capacity(raw.frames.len());
        for (frame_index, grid) in raw.frames.into_iter().enumerate() {
            let frame_number = frame_index + 1;
            let mut rows = Vec::with_capacity(grid.len());
            for (row, cells) in grid.into_iter().enumerate() {
                let parsed = cells
                    .iter()
                    .enumerate()
                    .map(|(col, hex)| {
                        RgbColor::from_hex(hex).with_context(|| {
                            format!("Frame {frame_number}, row {row}, column {col}")
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                rows.push(parsed);
            }
            let frame = Frame::from_rows(rows)
                .with_context(|| format!("Frame {frame_number} is malformed"))?;
            frames.push(frame);
        }

        let palette = match raw.palette {
            Some(entries) => {
                let colors = entries
                    .iter()
                    .enumerate()
                    .map(|(slot, hex)| {
                        RgbColor::from_hex(hex).with_context(|| format!("Palette slot {slot}"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Palette::from_colors(colors)
            }
            None => Palette::default(),
        };

        let speed = raw.speed.map_or(default_speed_ms, |s| {
            u32::try_from(s.max(0)).unwrap_or(u32::MAX)
        });

        let animation = Animation::from_frames(frames, speed)?;
        Ok(EditorSession::from_parts(animation, palette))
    }

    /// Renders a session as project JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(session: &EditorSession) -> Result<String> {
        let file = ProjectFileRef {
            frames: session.animation().frames(),
            palette: session.palette(),
            speed: session.animation().speed_ms(),
        };
        serde_json::to_string(&file).context("Failed to serialize project")
    }

    /// Saves a session to a JSON file.
    ///
    /// Uses temp file + rename so an interrupted save never leaves a
    /// truncated project behind.
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or I/O failure.
    pub fn save(session: &EditorSession, path: &Path) -> Result<()> {
        let content = Self::to_json(session)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create project directory: {}", parent.display())
            })?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp project file: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp project file to: {}", path.display())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_PALETTE, MAX_SPEED_MS};
    use tempfile::TempDir;

    fn two_by_two(palette: &str, speed: &str) -> String {
        format!(
            r##"{{"frames": [[["#FF0000","#000000"],["#000000","#00FF00"]]]{palette}{speed}}}"##
        )
    }

    #[test]
    fn test_parse_basic() {
        let json = two_by_two(r##", "palette": ["#111111"]"##, r#", "speed": 300"#);
        let session = ProjectService::parse(&json, 150).unwrap();

        let anim = session.animation();
        assert_eq!(anim.len(), 1);
        assert_eq!(anim.dimensions(), (2, 2));
        assert_eq!(anim.speed_ms(), 300);
        assert_eq!(
            anim.current_frame().get(0, 0),
            Some(RgbColor::new(255, 0, 0))
        );
    }

    #[test]
    fn test_five_entry_palette_padded() {
        let json = two_by_two(
            r##", "palette": ["#010101","#020202","#030303","#040404","#050505"]"##,
            "",
        );
        let session = ProjectService::parse(&json, 150).unwrap();
        let colors = session.palette().colors();

        assert_eq!(colors.len(), 8);
        assert_eq!(colors[4], RgbColor::new(5, 5, 5));
        assert_eq!(&colors[5..], &DEFAULT_PALETTE[5..]);
    }

    #[test]
    fn test_missing_palette_and_speed_defaulted() {
        let session = ProjectService::parse(&two_by_two("", ""), 220).unwrap();
        assert_eq!(session.palette(), &Palette::default());
        assert_eq!(session.animation().speed_ms(), 220);
    }

    #[test]
    fn test_speed_clamped() {
        let session = ProjectService::parse(&two_by_two("", r#", "speed": 99999"#), 150).unwrap();
        assert_eq!(session.animation().speed_ms(), MAX_SPEED_MS);

        let session = ProjectService::parse(&two_by_two("", r#", "speed": -5"#), 150).unwrap();
        assert_eq!(session.animation().speed_ms(), 50);
    }

    #[test]
    fn test_bad_color_names_cell() {
        let json = r##"{"frames": [[["#000000"]], [["#000000"]], [["#zzzzzz"]]]}"##;
        let err = ProjectService::parse(json, 150).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Frame 3, row 0, column 0"), "{message}");
    }

    #[test]
    fn test_empty_frames_rejected() {
        let err = ProjectService::parse(r#"{"frames": []}"#, 150).unwrap_err();
        assert!(format!("{err:#}").contains("at least one frame"));
    }

    #[test]
    fn test_mismatched_frames_rejected() {
        let json = r##"{"frames": [[["#000000"]], [["#000000","#000000"]]]}"##;
        assert!(ProjectService::parse(json, 150).is_err());
    }

    #[test]
    fn test_ragged_frame_rejected() {
        let json = r##"{"frames": [[["#000000","#000000"],["#000000"]]]}"##;
        let err = ProjectService::parse(json, 150).unwrap_err();
        assert!(format!("{err:#}").contains("Frame 1 is malformed"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("anim.json");

        let mut session = EditorSession::new(3, 4, 200).unwrap();
        session.set_palette_color(7, RgbColor::new(1, 2, 3)).unwrap();
        session.paint(2, 3);
        session.animation_mut().next_frame();

        ProjectService::save(&session, &path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = ProjectService::load(&path, 150).unwrap();
        assert_eq!(loaded.animation().frames(), session.animation().frames());
        assert_eq!(loaded.palette(), session.palette());
        assert_eq!(loaded.animation().speed_ms(), 200);
    }

    #[test]
    fn test_saved_json_shape() {
        let session = EditorSession::new(1, 2, 150).unwrap();
        let json = ProjectService::to_json(&session).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["frames"][0][0][1], "#000000");
        assert_eq!(value["palette"].as_array().unwrap().len(), 8);
        assert_eq!(value["speed"], 150);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProjectService::load(Path::new("/nonexistent/anim.json"), 150).unwrap_err();
        assert!(err.to_string().contains("Failed to read project file"));
    }
}
