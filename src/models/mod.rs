//! Data models for pixel-art frames, animations, and palettes.
//!
//! This module contains the core editor data structures.
//! Models are independent of file formats and any UI.

pub mod animation;
pub mod edit_error;
pub mod frame;
pub mod palette;
pub mod rgb;

// Re-export all model types
pub use animation::{parse_frame_number, Animation, PreviewCursor, MAX_SPEED_MS, MIN_SPEED_MS};
pub use edit_error::EditError;
pub use frame::{Frame, MAX_GRID_CELLS};
pub use palette::{Palette, DEFAULT_PALETTE, PALETTE_SIZE};
pub use rgb::RgbColor;
