//! Animation header generator.
//!
//! Writes one `PROGMEM` array per frame, an array of frame pointers, the
//! frame count, and the playback delay:
//!
//! ```text
//! #include <pgmspace.h>
//! const int walk_delay = 150;
//! const uint16_t walk1[] PROGMEM = {
//!   0x0000, 0xF800,
//! };
//!
//! const uint16_t* const walk_anim[] PROGMEM = {walk1};
//! const int walk_frame_count = 1;
//! ```

use std::fmt::Write as _;

use super::{validate_symbol, ExportError};
use crate::models::{Animation, Frame};

/// How frame values are broken across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWrap {
    /// A fixed number of values per line; the last line may be shorter.
    Fixed(usize),
    /// One grid row per line.
    GridRows,
}

impl Default for LineWrap {
    fn default() -> Self {
        Self::Fixed(12)
    }
}

/// Generates the animation header text.
///
/// # Errors
///
/// Returns an error if `symbol` is not a C identifier or `wrap` is
/// `Fixed(0)`.
///
/// # Examples
///
/// ```
/// use bubu::export::{generate_animation_header, LineWrap};
/// use bubu::models::Animation;
///
/// let anim = Animation::new(1, 2, 150).unwrap();
/// let header = generate_animation_header(&anim, "blink", LineWrap::GridRows).unwrap();
/// assert!(header.contains("const uint16_t blink1[] PROGMEM = {\n  0x0000, 0x0000,\n};\n"));
/// ```
pub fn generate_animation_header(
    animation: &Animation,
    symbol: &str,
    wrap: LineWrap,
) -> Result<String, ExportError> {
    validate_symbol(symbol)?;
    let per_line = match wrap {
        LineWrap::Fixed(0) => return Err(ExportError::ZeroValuesPerLine),
        LineWrap::Fixed(n) => n,
        LineWrap::GridRows => animation.dimensions().1,
    };

    let mut output = String::new();

    output.push_str("#include <pgmspace.h>\n");
    let _ = writeln!(output, "const int {}_delay = {};", symbol, animation.speed_ms());

    for (index, frame) in animation.frames().iter().enumerate() {
        let _ = writeln!(output, "const uint16_t {}{}[] PROGMEM = {{", symbol, index + 1);
        write_frame_values(&mut output, frame, per_line);
        output.push_str("};\n\n");
    }

    let names: Vec<String> = (1..=animation.len())
        .map(|number| format!("{symbol}{number}"))
        .collect();
    let _ = writeln!(
        output,
        "const uint16_t* const {}_anim[] PROGMEM = {{{}}};",
        symbol,
        names.join(", ")
    );
    let _ = writeln!(output, "const int {}_frame_count = {};", symbol, animation.len());

    Ok(output)
}

fn write_frame_values(output: &mut String, frame: &Frame, per_line: usize) {
    let values = frame.to_rgb565();
    for line in values.chunks(per_line) {
        let formatted: Vec<String> = line.iter().map(|v| format!("0x{v:04X}")).collect();
        output.push_str("  ");
        output.push_str(&formatted.join(", "));
        output.push_str(",\n");
    }
}
