use thiserror::Error;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("write at ({row}, {col}) is outside a {rows}x{cols} surface")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("write at ({row}, {col}) would spill past column {cols}")]
    Overflow { row: usize, col: usize, cols: usize },
    #[error("write would fill the bottom-right cell")]
    LastCell,
}

/// A character grid text can be written to.
pub trait Surface {
    fn size(&self) -> GridSize;

    /// Writes `text` starting at `(row, col)`. The whole string must fit on
    /// that row; nothing is written on error.
    fn put(&mut self, row: usize, col: usize, text: &str) -> Result<(), SurfaceError>;
}

/// Bounds rules every surface shares. The bottom-right cell is never
/// writable: most terminals scroll when the cursor lands past it.
pub fn check_put(size: GridSize, row: usize, col: usize, text: &str) -> Result<(), SurfaceError> {
    if row >= size.rows || col >= size.cols {
        return Err(SurfaceError::OutOfBounds {
            row,
            col,
            rows: size.rows,
            cols: size.cols,
        });
    }
    let width = text.width();
    if col + width > size.cols {
        return Err(SurfaceError::Overflow {
            row,
            col,
            cols: size.cols,
        });
    }
    if width > 0 && row + 1 == size.rows && col + width == size.cols {
        return Err(SurfaceError::LastCell);
    }
    Ok(())
}
