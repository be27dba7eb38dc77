use super::cpuinfo::FrequencySample;
use super::sensors::SensorSnapshot;
use super::usage::UtilizationSample;

/// Everything one refresh observed. Replaced wholesale each tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemSnapshot {
    pub frequencies: FrequencySample,
    pub usage: UtilizationSample,
    pub sensors: SensorSnapshot,
}
