//! Errors reported by editor operations.
//!
//! Every variant describes input the model refused; the model is left
//! untouched whenever one of these is returned.

use thiserror::Error;

/// An editor operation that was rejected without changing anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A frame number typed by the user is not a positive integer.
    #[error("'{input}' is not a frame number")]
    FrameNumber {
        /// The text that failed to parse.
        input: String,
    },

    /// A 1-based frame number outside the animation.
    #[error("frame {number} does not exist (animation has {count} frames)")]
    FrameOutOfRange {
        /// Requested frame number (1-based).
        number: usize,
        /// Number of frames in the animation.
        count: usize,
    },

    /// Attempted to delete the only frame.
    #[error("cannot delete the last remaining frame")]
    LastFrame,

    /// Palette slot outside `0..8`.
    #[error("palette slot {slot} does not exist")]
    PaletteSlot {
        /// Requested slot.
        slot: usize,
    },

    /// An animation with no frames.
    #[error("animation must contain at least one frame")]
    NoFrames,

    /// A grid with no rows or no columns.
    #[error("frame grid must have at least one row and one column")]
    EmptyGrid,

    /// A grid with more cells than the editor allows.
    #[error("a {rows}x{cols} grid is too large")]
    GridTooLarge {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// A grid row whose length differs from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Offending row (0-based).
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// A frame whose dimensions differ from the rest of the animation.
    #[error("frame is {found_rows}x{found_cols}, animation frames are {rows}x{cols}")]
    DimensionMismatch {
        /// Animation rows.
        rows: usize,
        /// Animation columns.
        cols: usize,
        /// Rows of the rejected frame.
        found_rows: usize,
        /// Columns of the rejected frame.
        found_cols: usize,
    },
}
