use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::layout::surface::check_put;
use crate::layout::{GridSize, Surface, SurfaceError};

/// Adapts a ratatui [`Buffer`] region to the layout [`Surface`].
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    style: Style,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, style: Style) -> Self {
        Self { buf, area, style }
    }
}

impl Surface for BufferSurface<'_> {
    fn size(&self) -> GridSize {
        GridSize::new(self.area.height as usize, self.area.width as usize)
    }

    fn put(&mut self, row: usize, col: usize, text: &str) -> Result<(), SurfaceError> {
        check_put(self.size(), row, col, text)?;
        // Both offsets are below the area's u16 extent after the check.
        let x = self.area.x + col as u16;
        let y = self.area.y + row as u16;
        self.buf.set_string(x, y, text, self.style);
        Ok(())
    }
}
