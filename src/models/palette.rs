//! The editor's eight-slot color palette.

use serde::{Deserialize, Serialize};

use super::{EditError, RgbColor};

/// Number of palette slots.
pub const PALETTE_SIZE: usize = 8;

/// Colors a fresh palette starts with.
pub const DEFAULT_PALETTE: [RgbColor; PALETTE_SIZE] = [
    RgbColor::new(0x00, 0x00, 0x00),
    RgbColor::new(0xFF, 0xFF, 0xFF),
    RgbColor::new(0xFF, 0x00, 0x00),
    RgbColor::new(0x00, 0xFF, 0x00),
    RgbColor::new(0x00, 0x00, 0xFF),
    RgbColor::new(0xFF, 0xFF, 0x00),
    RgbColor::new(0xFF, 0x00, 0xFF),
    RgbColor::new(0x00, 0xFF, 0xFF),
];

/// Fixed-size palette. Slots may repeat colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RgbColor>", into = "Vec<RgbColor>")]
pub struct Palette {
    slots: [RgbColor; PALETTE_SIZE],
}

impl Palette {
    /// Builds a palette from any number of colors.
    ///
    /// Missing slots are taken from [`DEFAULT_PALETTE`] at the same index;
    /// extra colors are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use bubu::models::{Palette, RgbColor, DEFAULT_PALETTE};
    ///
    /// let palette = Palette::from_colors(vec![RgbColor::new(1, 2, 3)]);
    /// assert_eq!(palette.get(0), Some(RgbColor::new(1, 2, 3)));
    /// assert_eq!(palette.get(7), Some(DEFAULT_PALETTE[7]));
    /// ```
    #[must_use]
    pub fn from_colors(colors: Vec<RgbColor>) -> Self {
        let mut slots = DEFAULT_PALETTE;
        for (slot, color) in slots.iter_mut().zip(colors) {
            *slot = color;
        }
        Self { slots }
    }

    /// Color in `slot`, if the slot exists.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<RgbColor> {
        self.slots.get(slot).copied()
    }

    /// Replaces the color in `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PaletteSlot`] if `slot` is out of range.
    pub fn set(&mut self, slot: usize, color: RgbColor) -> Result<(), EditError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(EditError::PaletteSlot { slot })?;
        *entry = color;
        Ok(())
    }

    /// All slots in order.
    #[must_use]
    pub const fn colors(&self) -> &[RgbColor; PALETTE_SIZE] {
        &self.slots
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            slots: DEFAULT_PALETTE,
        }
    }
}

impl From<Vec<RgbColor>> for Palette {
    fn from(colors: Vec<RgbColor>) -> Self {
        Self::from_colors(colors)
    }
}

impl From<Palette> for Vec<RgbColor> {
    fn from(palette: Palette) -> Self {
        palette.slots.to_vec()
    }
}
