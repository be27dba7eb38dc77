pub mod sections;
pub mod surface;
pub mod theme;

use ratatui::Frame;

use crate::app::App;
use crate::layout::render_dashboard;
use crate::ui::surface::BufferSurface;

/// Rebuilds the whole frame from the current snapshot.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let view = app.view();
    let mut surface = BufferSurface::new(frame.buffer_mut(), area, app.theme.text);
    render_dashboard(&mut surface, &view);
}
