//! Full-resolution face bitmap generator.
//!
//! The face editor works on a coarse grid; each cell stands for a
//! `block x block` square of physical pixels. Export expands the grid back
//! to display resolution and writes a single `face_bitmap` array.

use std::fmt::Write as _;

use super::ExportError;
use crate::models::Frame;

const VALUES_PER_LINE: usize = 12;

/// Largest bitmap the generator will produce, in pixels.
pub const MAX_BITMAP_PIXELS: usize = 1 << 22;

/// Output `(width, height)` of a frame expanded by `block`.
///
/// # Errors
///
/// Returns [`ExportError::ZeroBlock`] if `block` is zero and
/// [`ExportError::TooLarge`] if the bitmap would exceed
/// [`MAX_BITMAP_PIXELS`].
pub fn bitmap_size(frame: &Frame, block: usize) -> Result<(usize, usize), ExportError> {
    if block == 0 {
        return Err(ExportError::ZeroBlock);
    }

    let too_large = ExportError::TooLarge {
        rows: frame.rows(),
        cols: frame.cols(),
        block,
    };
    let width = frame.cols().checked_mul(block).ok_or_else(|| too_large.clone())?;
    let height = frame.rows().checked_mul(block).ok_or_else(|| too_large.clone())?;
    match width.checked_mul(height) {
        Some(pixels) if pixels <= MAX_BITMAP_PIXELS => Ok((width, height)),
        _ => Err(too_large),
    }
}

/// Expands a frame by `block` in both directions and packs it to RGB565.
///
/// The result is row-major at `(cols * block) x (rows * block)`.
///
/// # Errors
///
/// See [`bitmap_size`].
pub fn expand_frame(frame: &Frame, block: usize) -> Result<Vec<u16>, ExportError> {
    let (width, height) = bitmap_size(frame, block)?;

    let mut pixels = Vec::with_capacity(width * height);
    for row in frame.row_slices() {
        for _ in 0..block {
            for color in row {
                let value = color.to_rgb565();
                pixels.extend(std::iter::repeat(value).take(block));
            }
        }
    }
    Ok(pixels)
}

/// Generates `face.h` for one frame.
///
/// # Errors
///
/// See [`bitmap_size`].
pub fn generate_face_header(frame: &Frame, block: usize) -> Result<String, ExportError> {
    let (width, height) = bitmap_size(frame, block)?;
    let pixels = expand_frame(frame, block)?;

    let mut output = String::new();
    output.push_str("// Auto-generated face.h\n");
    output.push_str("#pragma once\n");
    output.push_str("#include <Arduino.h>\n\n");
    let _ = writeln!(output, "#define FACE_W {width}");
    let _ = writeln!(output, "#define FACE_H {height}\n");
    output.push_str("static const uint16_t face_bitmap[FACE_W * FACE_H] PROGMEM = {\n");

    for (i, value) in pixels.iter().enumerate() {
        if i % VALUES_PER_LINE == 0 {
            output.push_str("  ");
        }
        let _ = write!(output, "0x{value:04X}, ");
        if i % VALUES_PER_LINE == VALUES_PER_LINE - 1 {
            output.push('\n');
        }
    }
    if pixels.len() % VALUES_PER_LINE != 0 {
        output.push('\n');
    }
    output.push_str("};\n");

    Ok(output)
}
