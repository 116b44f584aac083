//! RGB color handling with hex parsing and RGB565 packing.

#![allow(clippy::trivially_copy_pass_by_ref)] // &self methods on a 3-byte Copy type
#![allow(clippy::cast_lossless)] // channel widening in const fns

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 24-bit color as drawn in the editor.
///
/// Project files store colors as `#RRGGBB` strings; firmware gets them
/// packed to RGB565 via [`RgbColor::to_rgb565`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red, 0-255.
    pub r: u8,
    /// Green, 0-255.
    pub g: u8,
    /// Blue, 0-255.
    pub b: u8,
}

impl RgbColor {
    /// Black, the color of an empty cell.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Builds a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (the `#` is optional, case and surrounding
    /// whitespace are ignored).
    ///
    /// ```
    /// use bubu::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::from_hex("#FF8000").unwrap(), RgbColor::new(255, 128, 0));
    /// assert_eq!(RgbColor::from_hex(" 00ff00 ").unwrap(), RgbColor::new(0, 255, 0));
    /// assert!(RgbColor::from_hex("#F80").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Fails unless exactly six hex digits remain.
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            anyhow::bail!("'{input}' is not a color; expected #RRGGBB");
        }

        let value = u32::from_str_radix(digits, 16)
            .with_context(|| format!("'{input}' is not a color"))?;
        let [_, r, g, b] = value.to_be_bytes();
        Ok(Self::new(r, g, b))
    }

    /// Uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Packs the color into RGB565.
    ///
    /// Keeps the top 5 bits of red, top 6 bits of green and top 5 bits of
    /// blue, laid out as `RRRRRGGGGGGBBBBB`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bubu::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(255, 0, 0).to_rgb565(), 0xF800);
    /// assert_eq!(RgbColor::new(0, 255, 0).to_rgb565(), 0x07E0);
    /// assert_eq!(RgbColor::new(0, 0, 255).to_rgb565(), 0x001F);
    /// ```
    #[must_use]
    pub const fn to_rgb565(&self) -> u16 {
        ((self.r as u16 & 0xF8) << 8) | ((self.g as u16 & 0xFC) << 3) | (self.b as u16 >> 3)
    }

    /// Expands an RGB565 value back to 8 bits per channel.
    ///
    /// The bits dropped by packing come back as zero, so
    /// `from_rgb565(c.to_rgb565())` equals `c` only for colors already on
    /// the 565 grid.
    #[must_use]
    pub const fn from_rgb565(value: u16) -> Self {
        Self {
            r: ((value >> 8) & 0xF8) as u8,
            g: ((value >> 3) & 0xFC) as u8,
            b: ((value << 3) & 0xF8) as u8,
        }
    }

    /// True for the empty-cell color.
    #[must_use]
    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for RgbColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}
