use unicode_width::UnicodeWidthStr;

use super::section::{Section, column_lines, split_columns};
use super::surface::Surface;
use crate::format::{truncate_ellipsis, truncate_width};

pub const EXIT_HINT: &str = "Press 'q' to exit";

const RULE_MAX: usize = 40;
const CORE_INDENT: usize = 2;
/// Above this many cores the list splits into two columns.
const SINGLE_COLUMN_CORES: usize = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct CoreLine {
    pub id: u32,
    pub text: String,
}

/// Everything one frame shows, already formatted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardView {
    pub model_name: String,
    pub cores: Vec<CoreLine>,
    pub sections: Vec<Section>,
}

/// Left and right column geometry for a surface `cols` wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Columns {
    left_width: usize,
    right_x: usize,
    right_width: usize,
}

impl Columns {
    fn for_width(cols: usize) -> Self {
        let right_x = cols / 2 + 1;
        Self {
            left_width: (cols / 2).saturating_sub(2),
            right_x,
            right_width: cols.saturating_sub(right_x + 1),
        }
    }
}

/// Writes `text` if the row is above the reserved bottom rows, clipping it
/// one column short of the right edge. Returns whether it landed.
pub fn safe_put(surface: &mut impl Surface, row: usize, col: usize, text: &str) -> bool {
    let size = surface.size();
    if row + 1 >= size.rows || col >= size.cols {
        return false;
    }
    let max_width = size.cols - col - 1;
    let text = if text.width() > max_width {
        truncate_width(text, max_width)
    } else {
        text.to_string()
    };
    surface.put(row, col, &text).is_ok()
}

/// Lowest row ordinary content may use, exclusive.
fn content_limit(surface: &impl Surface) -> usize {
    surface.size().rows.saturating_sub(2)
}

/// Draws the whole dashboard and the exit hint.
pub fn render_dashboard(surface: &mut impl Surface, view: &DashboardView) {
    let _span = tracing::debug_span!(
        "layout.render_dashboard",
        cores = view.cores.len(),
        sections = view.sections.len()
    )
    .entered();

    let mut row = render_header(surface, &view.model_name);
    row = render_cores(surface, row, &view.cores);
    if view.sections.iter().any(|s| !s.items.is_empty()) {
        row += 1;
        render_sections(surface, row, &view.sections);
    }
    render_exit_hint(surface);
}

pub fn render_header(surface: &mut impl Surface, model_name: &str) -> usize {
    let cols = surface.size().cols;
    safe_put(surface, 0, 0, &format!("CPU Model: {model_name}"));
    let rule = "-".repeat(RULE_MAX.min(cols.saturating_sub(1)));
    safe_put(surface, 1, 0, &rule);
    2
}

/// Lays out core lines in id order, one column up to eight cores and two
/// side-by-side halves beyond that. Returns the next free row.
pub fn render_cores(surface: &mut impl Surface, start: usize, cores: &[CoreLine]) -> usize {
    let mut sorted: Vec<&CoreLine> = cores.iter().collect();
    sorted.sort_by_key(|c| c.id);
    let limit = content_limit(surface);

    if sorted.len() <= SINGLE_COLUMN_CORES {
        let mut row = start;
        for core in sorted {
            if row >= limit {
                break;
            }
            safe_put(surface, row, CORE_INDENT, &core.text);
            row += 1;
        }
        return row;
    }

    let columns = Columns::for_width(surface.size().cols);
    let (left, right) = sorted.split_at(sorted.len().div_ceil(2));
    for (x, width, half) in [
        (CORE_INDENT, columns.left_width, left),
        (columns.right_x, columns.right_width, right),
    ] {
        for (i, core) in half.iter().enumerate() {
            if start + i >= limit {
                break;
            }
            safe_put(surface, start + i, x, &truncate_ellipsis(&core.text, width));
        }
    }
    start + left.len().max(right.len())
}

/// Renders sections into two columns starting at `start`. Returns the row
/// after the taller column, counting lines that did not fit.
pub fn render_sections(surface: &mut impl Surface, start: usize, sections: &[Section]) -> usize {
    let (left, right) = split_columns(sections);
    let left_lines = column_lines(&left);
    let right_lines = column_lines(&right);
    let columns = Columns::for_width(surface.size().cols);
    let limit = content_limit(surface);

    for (x, width, lines) in [
        (0, columns.left_width, &left_lines),
        (columns.right_x, columns.right_width, &right_lines),
    ] {
        for (i, line) in lines.iter().enumerate() {
            if start + i >= limit {
                break;
            }
            if line.is_empty() {
                continue;
            }
            safe_put(surface, start + i, x, &truncate_ellipsis(line, width));
        }
    }
    start + left_lines.len().max(right_lines.len())
}

/// The last row belongs to the exit hint, clipped to the terminal width. If
/// the terminal refuses it there, one row up is tried and a second refusal
/// is ignored.
pub fn render_exit_hint(surface: &mut impl Surface) {
    let size = surface.size();
    let Some(last) = size.rows.checked_sub(1) else {
        return;
    };
    let hint = truncate_width(EXIT_HINT, size.cols);
    if surface.put(last, 0, &hint).is_err()
        && let Some(above) = last.checked_sub(1)
    {
        let _ = surface.put(above, 0, &hint);
    }
}
