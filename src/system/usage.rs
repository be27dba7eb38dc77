use std::collections::BTreeMap;

use super::cpuinfo::CoreId;
use super::stat::{TickCounterSample, TickCounters};

/// Busy percentage per core, in `[0, 100]`.
pub type UtilizationSample = BTreeMap<CoreId, f64>;

/// Derives utilization from consecutive counter samples. Only cores present
/// in both samples get a value; a core with no baseline is left out.
pub fn estimate(previous: &TickCounterSample, current: &TickCounterSample) -> UtilizationSample {
    current
        .iter()
        .filter_map(|(id, curr)| {
            let prev = previous.get(id)?;
            Some((*id, core_utilization(prev, curr)))
        })
        .collect()
}

fn core_utilization(prev: &TickCounters, curr: &TickCounters) -> f64 {
    let total_delta = curr.total() as f64 - prev.total() as f64;
    if total_delta <= 0.0 {
        return 0.0;
    }
    let idle_delta = curr.idle() as f64 - prev.idle() as f64;
    ((total_delta - idle_delta) / total_delta * 100.0).clamp(0.0, 100.0)
}

/// Holds the one counter sample that survives between ticks.
#[derive(Debug, Default)]
pub struct UtilizationEstimator {
    previous: TickCounterSample,
}

impl UtilizationEstimator {
    pub fn new(seed: TickCounterSample) -> Self {
        Self { previous: seed }
    }

    /// Estimates against the stored baseline, then makes `current` the new
    /// baseline.
    pub fn advance(&mut self, current: TickCounterSample) -> UtilizationSample {
        let usage = estimate(&self.previous, &current);
        self.previous = current;
        usage
    }

    pub fn previous(&self) -> &TickCounterSample {
        &self.previous
    }
}
