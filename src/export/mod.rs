//! Header file export for embedded displays.
//!
//! Frames are written as `PROGMEM` arrays of RGB565 values that firmware
//! build scripts include directly, so the text layout of every generator in
//! this module is fixed down to the byte.

pub mod animation_header;
pub mod face_bitmap;

pub use animation_header::{generate_animation_header, LineWrap};
pub use face_bitmap::{bitmap_size, expand_frame, generate_face_header, MAX_BITMAP_PIXELS};

use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// Reasons an export was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The array name would not compile as a C identifier.
    #[error("'{symbol}' is not a valid C identifier")]
    InvalidSymbol {
        /// Offending name.
        symbol: String,
    },

    /// Block expansion factor of zero.
    #[error("block size must be at least 1")]
    ZeroBlock,

    /// Block expansion would produce an unreasonably large bitmap.
    #[error("a {rows}x{cols} frame at block {block} is too large to export")]
    TooLarge {
        /// Frame rows.
        rows: usize,
        /// Frame columns.
        cols: usize,
        /// Requested block size.
        block: usize,
    },

    /// Fixed line wrap of zero values per line.
    #[error("values per line must be at least 1")]
    ZeroValuesPerLine,
}

/// Derives the array name prefix from an output path.
///
/// The file name loses its `.h` and spaces become underscores, so
/// `out/my face.h` yields `my_face`.
///
/// # Errors
///
/// Returns [`ExportError::InvalidSymbol`] if the result is not a C
/// identifier.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use bubu::export::symbol_from_path;
///
/// assert_eq!(symbol_from_path(Path::new("out/walk cycle.h")).unwrap(), "walk_cycle");
/// assert!(symbol_from_path(Path::new("3d.h")).is_err());
/// ```
pub fn symbol_from_path(path: &Path) -> Result<String, ExportError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let symbol = file_name.replace(".h", "").replace(' ', "_");
    validate_symbol(&symbol)?;
    Ok(symbol)
}

/// Checks that `symbol` is usable as a C identifier.
///
/// # Errors
///
/// Returns [`ExportError::InvalidSymbol`] otherwise.
pub fn validate_symbol(symbol: &str) -> Result<(), ExportError> {
    let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    if identifier.is_match(symbol) {
        Ok(())
    } else {
        Err(ExportError::InvalidSymbol {
            symbol: symbol.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_from_path() {
        assert_eq!(symbol_from_path(Path::new("walk.h")).unwrap(), "walk");
        assert_eq!(
            symbol_from_path(Path::new("/tmp/idle anim.h")).unwrap(),
            "idle_anim"
        );
        assert_eq!(symbol_from_path(Path::new("blink")).unwrap(), "blink");
    }

    #[test]
    fn test_symbol_rejects_non_identifiers() {
        assert!(symbol_from_path(Path::new("2frames.h")).is_err());
        assert!(symbol_from_path(Path::new("face-left.h")).is_err());
        assert!(symbol_from_path(Path::new("")).is_err());
        assert!(validate_symbol("ok_name_2").is_ok());
    }
}
