/// Which block a section is. The declaration order is the canonical display
/// order the column split is tuned for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Temperatures,
    FanCooling,
    CpuInfo,
    Voltages,
    Power,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub items: Vec<String>,
}

impl Section {
    pub fn new(kind: SectionKind, title: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            items,
        }
    }
}

/// Splits sections into (left, right) columns by count, after putting them
/// in canonical order. Sections are never split across columns.
pub fn split_columns(sections: &[Section]) -> (Vec<&Section>, Vec<&Section>) {
    let mut ordered: Vec<&Section> = sections.iter().collect();
    ordered.sort_by_key(|s| s.kind);

    let left = match ordered.len() {
        n if n >= 5 => 3,
        4 | 3 => 2,
        n => n.min(1),
    };
    let right = ordered.split_off(left);
    (ordered, right)
}

/// Title, indented items and a blank separator per section; the final
/// separator is dropped. Sections without items produce nothing.
pub fn column_lines(sections: &[&Section]) -> Vec<String> {
    let mut lines = Vec::new();
    for section in sections.iter().filter(|s| !s.items.is_empty()) {
        lines.push(section.title.clone());
        lines.extend(section.items.iter().map(|item| format!("  {item}")));
        lines.push(String::new());
    }
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}
