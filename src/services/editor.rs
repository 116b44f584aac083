//! In-memory editing session: the animation, its palette, and the brush.

use crate::models::{Animation, EditError, Palette, RgbColor};

/// Everything a user edits in one project.
///
/// Painting always targets the animation's current frame with the selected
/// color. Palette changes select the slot that was changed, matching how a
/// color pick feels in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    animation: Animation,
    palette: Palette,
    selected: RgbColor,
}

impl EditorSession {
    /// Creates a session with one blank frame and the default palette.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyGrid`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize, speed_ms: u32) -> Result<Self, EditError> {
        Ok(Self::from_parts(
            Animation::new(rows, cols, speed_ms)?,
            Palette::default(),
        ))
    }

    /// Wraps an existing animation and palette. White is selected.
    #[must_use]
    pub const fn from_parts(animation: Animation, palette: Palette) -> Self {
        Self {
            animation,
            palette,
            selected: RgbColor::WHITE,
        }
    }

    /// The animation being edited.
    #[must_use]
    pub const fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Mutable access for frame navigation and management.
    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    /// The palette.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The brush color.
    #[must_use]
    pub const fn selected_color(&self) -> RgbColor {
        self.selected
    }

    /// Picks the brush color from a palette slot.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PaletteSlot`] if `slot` is out of range.
    pub fn select_color(&mut self, slot: usize) -> Result<RgbColor, EditError> {
        let color = self
            .palette
            .get(slot)
            .ok_or(EditError::PaletteSlot { slot })?;
        self.selected = color;
        Ok(color)
    }

    /// Uses an arbitrary color as the brush without touching the palette.
    pub fn set_brush(&mut self, color: RgbColor) {
        self.selected = color;
    }

    /// Replaces a palette slot and selects it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PaletteSlot`] if `slot` is out of range.
    pub fn set_palette_color(&mut self, slot: usize, color: RgbColor) -> Result<(), EditError> {
        self.palette.set(slot, color)?;
        self.selected = color;
        Ok(())
    }

    /// Paints one cell of the current frame with the brush color.
    /// Out-of-bounds coordinates are ignored and return `false`.
    pub fn paint(&mut self, row: usize, col: usize) -> bool {
        let color = self.selected;
        self.animation.current_frame_mut().paint(row, col, color)
    }

    /// Erases one cell of the current frame.
    pub fn erase(&mut self, row: usize, col: usize) -> bool {
        self.animation.current_frame_mut().erase(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_PALETTE;

    #[test]
    fn test_paint_uses_selected_color() {
        let mut session = EditorSession::new(3, 3, 150).unwrap();
        assert_eq!(session.selected_color(), RgbColor::WHITE);

        session.select_color(2).unwrap();
        assert!(session.paint(1, 1));
        assert_eq!(
            session.animation().current_frame().get(1, 1),
            Some(DEFAULT_PALETTE[2])
        );
    }

    #[test]
    fn test_paint_targets_current_frame() {
        let mut session = EditorSession::new(2, 2, 150).unwrap();
        session.animation_mut().next_frame();
        session.paint(0, 0);

        let frames = session.animation().frames();
        assert_eq!(frames[0].painted_cells(), 0);
        assert_eq!(frames[1].painted_cells(), 1);
    }

    #[test]
    fn test_erase_and_bounds() {
        let mut session = EditorSession::new(2, 2, 150).unwrap();
        session.paint(0, 0);
        assert!(session.erase(0, 0));
        assert!(!session.paint(9, 9));
        assert_eq!(session.animation().current_frame().painted_cells(), 0);
    }

    #[test]
    fn test_set_palette_color_selects_it() {
        let mut session = EditorSession::new(1, 1, 150).unwrap();
        let teal = RgbColor::new(0, 128, 128);

        session.set_palette_color(4, teal).unwrap();
        assert_eq!(session.palette().get(4), Some(teal));
        assert_eq!(session.selected_color(), teal);
    }

    #[test]
    fn test_invalid_slot_leaves_state() {
        let mut session = EditorSession::new(1, 1, 150).unwrap();
        let before = session.clone();

        assert_eq!(session.select_color(8), Err(EditError::PaletteSlot { slot: 8 }));
        assert_eq!(
            session.set_palette_color(11, RgbColor::BLACK),
            Err(EditError::PaletteSlot { slot: 11 })
        );
        assert_eq!(session, before);
    }
}
