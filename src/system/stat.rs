use std::collections::BTreeMap;

use super::cpuinfo::CoreId;
use super::source::{ReadError, SysRoot, read_text};

/// Position of the idle bucket in a `/proc/stat` cpu line.
pub const IDLE_INDEX: usize = 3;

/// Cumulative time buckets for one core: user, nice, system, idle, iowait,
/// irq, softirq, steal, ...
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickCounters(Vec<u64>);

impl TickCounters {
    /// Returns `None` when the idle bucket is missing.
    pub fn new(counters: Vec<u64>) -> Option<Self> {
        (counters.len() > IDLE_INDEX).then_some(Self(counters))
    }

    pub fn total(&self) -> u128 {
        self.0.iter().map(|&c| c as u128).sum()
    }

    pub fn idle(&self) -> u64 {
        self.0[IDLE_INDEX]
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}

pub type TickCounterSample = BTreeMap<CoreId, TickCounters>;

pub fn read_tick_counters(root: &SysRoot) -> Result<TickCounterSample, ReadError> {
    let text = read_text(&root.stat_path())?;
    Ok(parse_tick_counters(&text))
}

/// Collects `cpuN` lines; the aggregate `cpu` line and every non-cpu entry
/// are skipped, as are lines with a malformed counter.
pub fn parse_tick_counters(text: &str) -> TickCounterSample {
    text.lines().filter_map(parse_cpu_line).collect()
}

fn parse_cpu_line(line: &str) -> Option<(CoreId, TickCounters)> {
    let mut fields = line.split_whitespace();
    let id = fields.next()?.strip_prefix("cpu")?;
    if !id.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let id = id.parse().ok().map(CoreId)?;
    let counters = fields
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    Some((id, TickCounters::new(counters)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT: &str = "\
cpu  10132153 290696 3084719 46828483 16683 0 25195 0 175628 0
cpu0 1393280 32966 572056 13343292 6130 0 17875 0 23933 0
cpu1 1335108 34397 387161 13589405 1794 0 1524 0 21902 0
cpu2 12 x 3 4
cpu3 1 2 3
intr 1462898 0 9 0 0
ctxt 115315133
btime 1769394807
processes 86031
";

    #[test]
    fn parses_per_core_lines_only() {
        let sample = parse_tick_counters(STAT);
        let ids: Vec<CoreId> = sample.keys().copied().collect();
        assert_eq!(ids, vec![CoreId(0), CoreId(1)]);
        assert_eq!(sample[&CoreId(0)].idle(), 13343292);
        assert_eq!(sample[&CoreId(1)].as_slice().len(), 10);
    }

    #[test]
    fn counters_need_an_idle_bucket() {
        assert!(TickCounters::new(vec![1, 2, 3]).is_none());
        let counters = TickCounters::new(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(counters.total(), 10);
        assert_eq!(counters.idle(), 4);
    }

    #[test]
    fn non_numeric_core_suffix_is_skipped() {
        assert!(parse_tick_counters("cpux 1 2 3 4 5\ncpu 1 2 3 4\n").is_empty());
    }

    #[test]
    fn reads_from_proc_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stat"), STAT).unwrap();
        let root = SysRoot::new(dir.path(), dir.path());
        assert_eq!(read_tick_counters(&root).unwrap().len(), 2);

        let missing = SysRoot::new(dir.path().join("nope"), dir.path());
        assert!(read_tick_counters(&missing).is_err());
    }
}
