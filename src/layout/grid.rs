use unicode_width::UnicodeWidthChar;

use super::surface::{GridSize, Surface, SurfaceError, check_put};

/// One attempted write, kept whether or not it landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub text: String,
    pub accepted: bool,
}

/// In-memory surface. Records every write attempt so callers can inspect
/// exactly what the layout tried to do.
#[derive(Clone, Debug)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Vec<Option<char>>>,
    placements: Vec<Placement>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            size: GridSize::new(rows, cols),
            cells: vec![vec![Some(' '); cols]; rows],
            placements: Vec::new(),
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Row contents with trailing blanks trimmed.
    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|cells| cells.iter().flatten().collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.size.rows).map(|row| self.row_text(row)).collect()
    }
}

impl Surface for Grid {
    fn size(&self) -> GridSize {
        self.size
    }

    fn put(&mut self, row: usize, col: usize, text: &str) -> Result<(), SurfaceError> {
        let result = check_put(self.size, row, col, text);
        self.placements.push(Placement {
            row,
            col,
            text: text.to_string(),
            accepted: result.is_ok(),
        });
        result?;

        let cells = &mut self.cells[row];
        let mut x = col;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            cells[x] = Some(ch);
            // Wide glyphs cover the following cell.
            for cell in cells.iter_mut().skip(x + 1).take(width - 1) {
                *cell = None;
            }
            x += width;
        }
        Ok(())
    }
}
