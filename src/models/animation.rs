//! Ordered frame storage with a current-frame cursor.

use super::{EditError, Frame};

/// Fastest allowed playback delay in milliseconds.
pub const MIN_SPEED_MS: u32 = 50;

/// Slowest allowed playback delay in milliseconds.
pub const MAX_SPEED_MS: u32 = 1000;

/// An ordered, non-empty sequence of equally sized frames.
///
/// Frame order is playback order. The current index always points at an
/// existing frame: operations that would break that (deleting the only
/// frame, jumping past the end) are refused with an [`EditError`] and leave
/// the animation as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    frames: Vec<Frame>,
    current: usize,
    speed_ms: u32,
}

impl Animation {
    /// Creates an animation holding one blank frame.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyGrid`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize, speed_ms: u32) -> Result<Self, EditError> {
        Ok(Self {
            frames: vec![Frame::new(rows, cols)?],
            current: 0,
            speed_ms: clamp_speed(speed_ms),
        })
    }

    /// Creates an animation from existing frames, positioned on the first.
    ///
    /// # Errors
    ///
    /// Returns an error if `frames` is empty or the frames differ in size.
    pub fn from_frames(frames: Vec<Frame>, speed_ms: u32) -> Result<Self, EditError> {
        let first = frames.first().ok_or(EditError::NoFrames)?;
        let (rows, cols) = first.dimensions();

        if let Some(odd) = frames.iter().find(|f| f.dimensions() != (rows, cols)) {
            return Err(EditError::DimensionMismatch {
                rows,
                cols,
                found_rows: odd.rows(),
                found_cols: odd.cols(),
            });
        }

        Ok(Self {
            frames,
            current: 0,
            speed_ms: clamp_speed(speed_ms),
        })
    }

    /// Number of frames (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Never true: an animation always holds at least one frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Grid size shared by every frame.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        self.frames[0].dimensions()
    }

    /// All frames in playback order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame by 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::FrameOutOfRange`] if no such frame exists.
    pub fn frame(&self, number: usize) -> Result<&Frame, EditError> {
        let index = self.index_of(number)?;
        Ok(&self.frames[index])
    }

    /// 0-based index of the current frame.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The frame being edited.
    #[must_use]
    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current]
    }

    /// Mutable access to the frame being edited.
    pub fn current_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current]
    }

    /// Playback delay between frames.
    #[must_use]
    pub const fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    /// Sets the playback delay, clamped to `MIN_SPEED_MS..=MAX_SPEED_MS`.
    pub fn set_speed_ms(&mut self, speed_ms: u32) {
        self.speed_ms = clamp_speed(speed_ms);
    }

    /// Moves to the next frame, appending a blank one when already on the
    /// last frame. Returns the new current index.
    pub fn next_frame(&mut self) -> usize {
        if self.current + 1 >= self.frames.len() {
            let blank = self.blank_frame();
            self.frames.push(blank);
        }
        self.current += 1;
        self.current
    }

    /// Moves to the previous frame. Returns `false` on the first frame.
    pub fn prev_frame(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Makes frame `number` (1-based) current.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::FrameOutOfRange`] if no such frame exists.
    pub fn goto_frame(&mut self, number: usize) -> Result<(), EditError> {
        self.current = self.index_of(number)?;
        Ok(())
    }

    /// Copies frame `source` (1-based) and inserts the copy right after the
    /// current frame, which then becomes current. Returns the new index.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::FrameOutOfRange`] if `source` does not exist.
    pub fn clone_frame(&mut self, source: usize) -> Result<usize, EditError> {
        let copy = self.frame(source)?.clone();
        self.current += 1;
        self.frames.insert(self.current, copy);
        Ok(self.current)
    }

    /// Parses user text as a frame number and clones that frame.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::FrameNumber`] for text that is not a positive
    /// integer, otherwise as [`Animation::clone_frame`].
    pub fn clone_frame_from_input(&mut self, input: &str) -> Result<usize, EditError> {
        let number = parse_frame_number(input)?;
        self.clone_frame(number)
    }

    /// Inserts a blank frame after the current one and makes it current.
    pub fn insert_blank_frame(&mut self) -> usize {
        let blank = self.blank_frame();
        self.current += 1;
        self.frames.insert(self.current, blank);
        self.current
    }

    /// Removes the current frame. The cursor stays at the same index, or
    /// moves back one when the last frame was removed.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::LastFrame`] if this is the only frame.
    pub fn delete_current_frame(&mut self) -> Result<Frame, EditError> {
        if self.frames.len() <= 1 {
            return Err(EditError::LastFrame);
        }
        let removed = self.frames.remove(self.current);
        self.current = self.current.min(self.frames.len() - 1);
        Ok(removed)
    }

    fn blank_frame(&self) -> Frame {
        let mut blank = self.frames[self.current].clone();
        blank.clear();
        blank
    }

    fn index_of(&self, number: usize) -> Result<usize, EditError> {
        if number == 0 || number > self.frames.len() {
            return Err(EditError::FrameOutOfRange {
                number,
                count: self.frames.len(),
            });
        }
        Ok(number - 1)
    }
}

/// Parses a 1-based frame number typed by the user.
///
/// # Errors
///
/// Returns [`EditError::FrameNumber`] unless `input` is a positive integer.
pub fn parse_frame_number(input: &str) -> Result<usize, EditError> {
    match input.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(EditError::FrameNumber {
            input: input.to_string(),
        }),
    }
}

fn clamp_speed(speed_ms: u32) -> u32 {
    speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS)
}

/// Cycles through frame indices for the live preview.
///
/// The cursor holds only an index, so frames may be added or removed
/// between ticks; an index that fell off the end wraps back to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewCursor {
    next: usize,
}

impl PreviewCursor {
    /// Creates a cursor starting at frame 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns the index to show on this tick and advances.
    pub fn tick(&mut self, animation: &Animation) -> usize {
        let len = animation.len();
        if self.next >= len {
            self.next = 0;
        }
        let shown = self.next;
        self.next = (shown + 1) % len;
        shown
    }
}
