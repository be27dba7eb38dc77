//! Pure text layout: places the dashboard onto any [`Surface`], never
//! failing when content does not fit.

pub mod engine;
pub mod grid;
pub mod section;
pub mod surface;

pub use engine::{CoreLine, DashboardView, EXIT_HINT, render_dashboard};
pub use grid::Grid;
pub use section::{Section, SectionKind};
pub use surface::{GridSize, Surface, SurfaceError};
