use super::cpuinfo::{self, StaticCpuInfo};
use super::hwmon;
use super::sensors::{self, SensorPolicy};
use super::snapshot::SystemSnapshot;
use super::source::SysRoot;
use super::stat::{self, TickCounterSample};
use super::usage::UtilizationEstimator;

/// Runs every adapter once per refresh and folds the results into a
/// snapshot. A failing adapter only empties its own part.
pub struct Collector {
    root: SysRoot,
    policy: SensorPolicy,
    estimator: UtilizationEstimator,
}

impl Collector {
    /// Seeds the estimator with one counter sample. The caller is expected
    /// to wait before the first `refresh` so usage has a real interval.
    pub fn new(root: SysRoot, policy: SensorPolicy) -> Self {
        let seed = read_counters(&root);
        Collector {
            root,
            policy,
            estimator: UtilizationEstimator::new(seed),
        }
    }

    pub fn policy(&self) -> &SensorPolicy {
        &self.policy
    }

    pub fn static_info(&self) -> StaticCpuInfo {
        cpuinfo::read_static_info(&self.root)
    }

    pub fn refresh(&mut self) -> SystemSnapshot {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        let frequencies = cpuinfo::read_frequencies(&self.root).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "frequencies unavailable");
            Default::default()
        });

        let usage = self.estimator.advance(read_counters(&self.root));

        let devices = hwmon::read_hwmon_tree(&self.root).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "hardware monitors unavailable");
            Vec::new()
        });
        let sensors = sensors::normalize(&devices, &self.policy);

        SystemSnapshot {
            frequencies,
            usage,
            sensors,
        }
    }
}

fn read_counters(root: &SysRoot) -> TickCounterSample {
    stat::read_tick_counters(root).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "tick counters unavailable");
        TickCounterSample::new()
    })
}
