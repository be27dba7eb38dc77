use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::hwmon::{HwmonDevice, SensorKind};
use crate::format::natural_cmp;

/// A display name for one reading, `<device>_<label or kind+index>`.
/// Ordered naturally so maps keyed by it iterate the way they are shown.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SensorName(String);

impl SensorName {
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (!name.trim().is_empty()).then_some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for SensorName {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for SensorName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SensorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
    pub kind: SensorKind,
    pub device: String,
    /// Position of the device in the hwmon walk.
    pub device_order: usize,
    pub index: u32,
    pub name: SensorName,
    pub value: f64,
}

pub type SensorMap = BTreeMap<SensorName, SensorReading>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SensorSnapshot {
    pub temps: SensorMap,
    pub fans: SensorMap,
    pub voltages: SensorMap,
    pub power: SensorMap,
    pub duty_cycles: SensorMap,
}

impl SensorSnapshot {
    pub fn get(&self, kind: SensorKind) -> &SensorMap {
        match kind {
            SensorKind::Temperature => &self.temps,
            SensorKind::Fan => &self.fans,
            SensorKind::Voltage => &self.voltages,
            SensorKind::Power => &self.power,
            SensorKind::DutyCycle => &self.duty_cycles,
        }
    }

    fn get_mut(&mut self, kind: SensorKind) -> &mut SensorMap {
        match kind {
            SensorKind::Temperature => &mut self.temps,
            SensorKind::Fan => &mut self.fans,
            SensorKind::Voltage => &mut self.voltages,
            SensorKind::Power => &mut self.power,
            SensorKind::DutyCycle => &mut self.duty_cycles,
        }
    }

    pub fn is_empty(&self) -> bool {
        SensorKind::ALL.iter().all(|&kind| self.get(kind).is_empty())
    }
}

/// Tunables for what counts as a believable and interesting temperature.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorPolicy {
    /// Exclusive lower bound, °C.
    pub temp_min: f64,
    /// Exclusive upper bound, °C.
    pub temp_max: f64,
    /// Lowercase substrings a temperature name must contain to be essential.
    pub essential: Vec<String>,
}

pub const DEFAULT_ESSENTIAL_TEMPS: [&str; 11] = [
    "k10temp",
    "nvme",
    "amdgpu",
    "spd5118",
    "r8169",
    "coretemp",
    "systin",
    "cputin",
    "tsi0_temp",
    "smbusmaster",
    "auxtin",
];

impl Default for SensorPolicy {
    fn default() -> Self {
        SensorPolicy {
            temp_min: 0.0,
            temp_max: 150.0,
            essential: DEFAULT_ESSENTIAL_TEMPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SensorPolicy {
    pub fn plausible_temp(&self, celsius: f64) -> bool {
        celsius > self.temp_min && celsius < self.temp_max
    }

    pub fn is_essential(&self, name: &SensorName) -> bool {
        let lower = name.as_str().to_lowercase();
        self.essential
            .iter()
            .any(|needle| lower.contains(needle.as_str()))
    }
}

/// Names, converts and classifies every raw reading. Temperatures outside
/// the policy bounds are dropped here. Within a kind a later reading with
/// the same name replaces the earlier one.
pub fn normalize(devices: &[HwmonDevice], policy: &SensorPolicy) -> SensorSnapshot {
    let mut snapshot = SensorSnapshot::default();
    for (device_order, device) in devices.iter().enumerate() {
        for reading in &device.readings {
            let value = reading.kind.convert(reading.raw);
            if reading.kind == SensorKind::Temperature && !policy.plausible_temp(value) {
                continue;
            }
            let suffix = match &reading.label {
                Some(label) => label.clone(),
                None => format!("{}{}", reading.kind.prefix(), reading.index),
            };
            let Some(name) = SensorName::new(format!("{}_{suffix}", device.name)) else {
                continue;
            };
            let entry = SensorReading {
                kind: reading.kind,
                device: device.name.clone(),
                device_order,
                index: reading.index,
                name: name.clone(),
                value,
            };
            if snapshot.get_mut(reading.kind).insert(name, entry).is_some() {
                tracing::debug!(
                    device = %device.name,
                    index = reading.index,
                    kind = ?reading.kind,
                    "sensor name collision, keeping the later reading"
                );
            }
        }
    }
    snapshot
}

/// Keeps the allow-listed, plausible temperatures.
pub fn select_essential_temps(temps: &SensorMap, policy: &SensorPolicy) -> SensorMap {
    temps
        .iter()
        .filter(|(name, reading)| policy.is_essential(name) && policy.plausible_temp(reading.value))
        .map(|(name, reading)| (name.clone(), reading.clone()))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct FanCoolingEntry {
    pub device: String,
    pub index: u32,
    pub rpm: f64,
    pub duty: Option<f64>,
}

impl FanCoolingEntry {
    pub fn display_name(&self) -> String {
        format!("Fan{}", self.index)
    }

    pub fn display_line(&self) -> String {
        let mut line = format!("{}: {:4.0}rpm", self.display_name(), self.rpm);
        match self.duty {
            // A stalled or unplugged fan's PWM setting says nothing useful.
            Some(_) if self.rpm == 0.0 => line.push_str(" (N/A)"),
            Some(duty) => line.push_str(&format!(" ({duty:3.0}%)")),
            None => {}
        }
        line
    }
}

/// Joins each fan to the PWM channel on the same device and index.
/// Devices keep their walk order; fans sort naturally within one.
pub fn build_fan_cooling_view(fans: &SensorMap, duty_cycles: &SensorMap) -> Vec<FanCoolingEntry> {
    let duty: HashMap<(usize, u32), f64> = duty_cycles
        .values()
        .map(|r| ((r.device_order, r.index), r.value))
        .collect();

    let mut entries: Vec<(usize, FanCoolingEntry)> = fans
        .values()
        .map(|fan| {
            let entry = FanCoolingEntry {
                device: fan.device.clone(),
                index: fan.index,
                rpm: fan.value,
                duty: duty.get(&(fan.device_order, fan.index)).copied(),
            };
            (fan.device_order, entry)
        })
        .collect();
    entries.sort_by(|(a_order, a), (b_order, b)| {
        a_order
            .cmp(b_order)
            .then_with(|| natural_cmp(&a.display_name(), &b.display_name()))
    });
    entries.into_iter().map(|(_, entry)| entry).collect()
}
