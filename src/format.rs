use std::cmp::Ordering;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Cuts `s` down to at most `max_width` display columns.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Fits `s` into `max_width` columns, replacing the tail with `...` when it
/// does not fit. The marker always takes the last three columns.
pub fn truncate_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = truncate_width(s, max_width.saturating_sub(ELLIPSIS.len()));
    result.push_str(ELLIPSIS);
    result
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Number(u64),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;
    for (i, ch) in s.char_indices() {
        let digit = ch.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != digit => {
                out.push(chunk(&s[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    if let Some(digit) = in_digits {
        out.push(chunk(&s[start..], digit));
    }
    out
}

fn chunk(part: &str, digit: bool) -> Chunk<'_> {
    if digit {
        // Absurdly long digit runs saturate instead of failing.
        Chunk::Number(part.parse().unwrap_or(u64::MAX))
    } else {
        Chunk::Text(part)
    }
}

/// Numeric-aware, case-insensitive ordering: `Fan2` sorts before `Fan10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Number(x), Chunk::Number(y)) => x.cmp(y),
            (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

pub fn format_core_line(id: u32, mhz: f64, usage: Option<f64>) -> String {
    let mut line = format!("Core {id:2}: {mhz:7.2} MHz");
    if let Some(usage) = usage {
        line.push_str(&format!(" ({usage:5.1}%)"));
    }
    line
}
