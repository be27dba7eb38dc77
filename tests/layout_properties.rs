use std::collections::BTreeMap;

use proptest::prelude::*;
use sensortop::format::format_core_line;
use sensortop::layout::section::split_columns;
use sensortop::layout::{
    CoreLine, DashboardView, EXIT_HINT, Grid, Section, SectionKind, render_dashboard,
};
use sensortop::system::cpuinfo::CoreId;
use sensortop::system::hwmon::{HwmonDevice, RawReading, SensorKind};
use sensortop::system::sensors::{SensorPolicy, normalize, select_essential_temps};
use sensortop::system::stat::{TickCounterSample, TickCounters};
use sensortop::system::usage::estimate;
use unicode_width::UnicodeWidthStr;

const KINDS: [SectionKind; 5] = [
    SectionKind::Temperatures,
    SectionKind::FanCooling,
    SectionKind::CpuInfo,
    SectionKind::Voltages,
    SectionKind::Power,
];

fn make_view(cores: u32, section_items: &[usize]) -> DashboardView {
    DashboardView {
        model_name: "Property Test Processor".to_string(),
        cores: (0..cores)
            .rev()
            .map(|id| CoreLine {
                id,
                text: format_core_line(id, 3000.0 + id as f64, (id % 2 == 0).then_some(42.0)),
            })
            .collect(),
        sections: KINDS
            .iter()
            .zip(section_items)
            .filter(|(_, n)| **n > 0)
            .map(|(kind, &n)| {
                Section::new(
                    *kind,
                    format!("{kind:?} (°C):"),
                    (0..n).map(|i| format!("sensor_{i}: {:5.1}", i as f64)).collect(),
                )
            })
            .collect(),
    }
}

fn sample(rows: &[(u32, Vec<u64>)]) -> TickCounterSample {
    rows.iter()
        .filter_map(|(id, counters)| Some((CoreId(*id), TickCounters::new(counters.clone())?)))
        .collect()
}

proptest! {
    #[test]
    fn accepted_writes_stay_inside_the_grid(
        rows in 1usize..40,
        cols in 1usize..120,
        cores in 0u32..40,
        items in prop::collection::vec(0usize..6, 5),
    ) {
        let mut grid = Grid::new(rows, cols);
        render_dashboard(&mut grid, &make_view(cores, &items));

        for p in grid.placements().iter().filter(|p| p.accepted) {
            let width = p.text.width();
            prop_assert!(p.row < rows, "row {} of {}", p.row, rows);
            prop_assert!(p.col + width <= cols, "{:?} overflows {} cols", p, cols);
            prop_assert!(
                !(p.row + 1 == rows && p.col + width == cols && width > 0),
                "{:?} fills the bottom-right cell", p
            );
        }
    }

    #[test]
    fn only_the_exit_hint_targets_the_last_row(
        rows in 1usize..40,
        cols in 1usize..120,
        cores in 0u32..40,
        items in prop::collection::vec(0usize..6, 5),
    ) {
        let mut grid = Grid::new(rows, cols);
        render_dashboard(&mut grid, &make_view(cores, &items));

        for p in grid.placements() {
            if p.row + 1 == rows {
                prop_assert!(EXIT_HINT.starts_with(p.text.as_str()), "{:?} on the last row", p);
            }
        }
    }

    #[test]
    fn exit_hint_is_always_visible(
        rows in 2usize..40,
        cols in 2usize..120,
        cores in 0u32..40,
    ) {
        let mut grid = Grid::new(rows, cols);
        render_dashboard(&mut grid, &make_view(cores, &[1, 1, 1, 1, 1]));

        let hint = grid
            .placements()
            .iter()
            .filter(|p| p.accepted && p.row + 2 >= rows && !p.text.is_empty())
            .filter(|p| EXIT_HINT.starts_with(p.text.as_str()))
            .count();
        prop_assert_eq!(hint, 1);
    }

    #[test]
    fn column_split_keeps_every_section_once(
        items in prop::collection::vec(0usize..4, 5),
    ) {
        let sections = make_view(0, &items).sections;
        let (left, right) = split_columns(&sections);
        let expected_left = match sections.len() {
            n if n >= 5 => 3,
            3 | 4 => 2,
            n => n.min(1),
        };
        prop_assert_eq!(left.len(), expected_left);
        prop_assert_eq!(left.len() + right.len(), sections.len());

        let kinds: Vec<SectionKind> = left.iter().chain(&right).map(|s| s.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        prop_assert_eq!(kinds, sorted);
    }

    #[test]
    fn utilization_is_bounded_and_keyed_by_both_samples(
        prev in prop::collection::vec((0u32..16, prop::collection::vec(0u64..1_000_000, 4..10)), 0..16),
        curr in prop::collection::vec((0u32..16, prop::collection::vec(0u64..1_000_000, 4..10)), 0..16),
    ) {
        let prev = sample(&prev);
        let curr = sample(&curr);
        let usage = estimate(&prev, &curr);

        for (id, value) in &usage {
            prop_assert!(prev.contains_key(id) && curr.contains_key(id));
            prop_assert!((0.0..=100.0).contains(value), "core {} at {}", id, value);
        }
        for id in prev.keys().filter(|id| curr.contains_key(id)) {
            prop_assert!(usage.contains_key(id));
        }
    }

    #[test]
    fn unchanged_counters_report_zero(
        rows in prop::collection::vec((0u32..16, prop::collection::vec(0u64..1_000_000, 4..10)), 1..16),
    ) {
        let same = sample(&rows);
        let usage = estimate(&same, &same);
        prop_assert_eq!(usage.len(), same.len());
        prop_assert!(usage.values().all(|&v| v == 0.0));
    }

    #[test]
    fn essential_temps_are_plausible(
        raws in prop::collection::vec(-50_000i64..250_000, 0..24),
    ) {
        let devices = vec![HwmonDevice {
            name: "k10temp".to_string(),
            readings: raws
                .iter()
                .enumerate()
                .map(|(i, &raw)| RawReading {
                    kind: SensorKind::Temperature,
                    index: i as u32 + 1,
                    raw,
                    label: None,
                })
                .collect(),
        }];
        let policy = SensorPolicy::default();
        let snapshot = normalize(&devices, &policy);
        let essential = select_essential_temps(&snapshot.temps, &policy);

        prop_assert_eq!(essential.len(), snapshot.temps.len());
        for reading in essential.values() {
            prop_assert!(reading.value > 0.0 && reading.value < 150.0);
        }
        let expected: BTreeMap<u32, f64> = raws
            .iter()
            .enumerate()
            .map(|(i, &raw)| (i as u32 + 1, raw as f64 / 1000.0))
            .filter(|(_, c)| *c > 0.0 && *c < 150.0)
            .collect();
        prop_assert_eq!(essential.len(), expected.len());
    }
}
