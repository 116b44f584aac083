//! A single animation frame: a fixed-size grid of colors.

use serde::{Deserialize, Serialize};

use super::{EditError, RgbColor};

/// Largest grid [`Frame::new`] will allocate, in cells.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// One complete grid of pixel colors.
///
/// Cells are stored row-major. The grid size is fixed at construction;
/// painting outside it is silently ignored, the way a stray click past the
/// canvas edge would be.
///
/// # Validation
///
/// - At least one row and one column
/// - Every row the same width
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<RgbColor>>", into = "Vec<Vec<RgbColor>>")]
pub struct Frame {
    rows: usize,
    cols: usize,
    cells: Vec<RgbColor>,
}

impl Frame {
    /// Creates a blank (all black) frame.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyGrid`] if either dimension is zero and
    /// [`EditError::GridTooLarge`] above [`MAX_GRID_CELLS`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, EditError> {
        if rows == 0 || cols == 0 {
            return Err(EditError::EmptyGrid);
        }

        let cell_count = rows
            .checked_mul(cols)
            .filter(|&n| n <= MAX_GRID_CELLS)
            .ok_or(EditError::GridTooLarge { rows, cols })?;

        Ok(Self {
            rows,
            cols,
            cells: vec![RgbColor::BLACK; cell_count],
        })
    }

    /// Builds a frame from nested rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or ragged.
    pub fn from_rows(rows: Vec<Vec<RgbColor>>) -> Result<Self, EditError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(EditError::EmptyGrid);
        }

        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count * cols);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(EditError::RaggedRow {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the color at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<RgbColor> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Sets one cell. Returns `false` and changes nothing if `(row, col)`
    /// lies outside the grid.
    pub fn paint(&mut self, row: usize, col: usize, color: RgbColor) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = color;
                true
            }
            None => false,
        }
    }

    /// Resets one cell to black. Out-of-bounds coordinates are ignored.
    pub fn erase(&mut self, row: usize, col: usize) -> bool {
        self.paint(row, col, RgbColor::BLACK)
    }

    /// Resets every cell to black.
    pub fn clear(&mut self) {
        self.cells.fill(RgbColor::BLACK);
    }

    /// Iterates over the grid one row at a time.
    pub fn row_slices(&self) -> impl Iterator<Item = &[RgbColor]> {
        self.cells.chunks(self.cols)
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[RgbColor] {
        &self.cells
    }

    /// Number of cells that are not black.
    #[must_use]
    pub fn painted_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_black()).count()
    }

    /// The frame packed to RGB565, row-major.
    #[must_use]
    pub fn to_rgb565(&self) -> Vec<u16> {
        self.cells.iter().map(RgbColor::to_rgb565).collect()
    }

    const fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }
}

impl TryFrom<Vec<Vec<RgbColor>>> for Frame {
    type Error = EditError;

    fn try_from(rows: Vec<Vec<RgbColor>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Frame> for Vec<Vec<RgbColor>> {
    fn from(frame: Frame) -> Self {
        frame.row_slices().map(<[RgbColor]>::to_vec).collect()
    }
}
