use std::fs;
use std::path::{Path, PathBuf};

use super::source::{ReadError, SysRoot, read_parsed, read_trimmed};
use crate::format::natural_cmp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SensorKind {
    Temperature,
    Fan,
    Voltage,
    Power,
    DutyCycle,
}

impl SensorKind {
    pub const ALL: [SensorKind; 5] = [
        SensorKind::Temperature,
        SensorKind::Fan,
        SensorKind::Voltage,
        SensorKind::Power,
        SensorKind::DutyCycle,
    ];

    /// Attribute prefix used by the hwmon sysfs ABI.
    pub fn prefix(self) -> &'static str {
        match self {
            SensorKind::Temperature => "temp",
            SensorKind::Fan => "fan",
            SensorKind::Voltage => "in",
            SensorKind::Power => "power",
            SensorKind::DutyCycle => "pwm",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::Fan => "RPM",
            SensorKind::Voltage => "V",
            SensorKind::Power => "W",
            SensorKind::DutyCycle => "%",
        }
    }

    /// Converts a raw sysfs integer into display units.
    pub fn convert(self, raw: i64) -> f64 {
        match self {
            SensorKind::Temperature | SensorKind::Voltage => raw as f64 / 1_000.0,
            SensorKind::Power => raw as f64 / 1_000_000.0,
            SensorKind::Fan => raw as f64,
            SensorKind::DutyCycle => raw as f64 / 255.0 * 100.0,
        }
    }

    /// Recognizes `temp<N>_input`, `fan<N>_input`, `in<N>_input`,
    /// `power<N>_input` and bare `pwm<N>`.
    pub fn classify(file_name: &str) -> Option<(SensorKind, u32)> {
        if let Some(index) = file_name
            .strip_prefix(SensorKind::DutyCycle.prefix())
            .and_then(parse_index)
        {
            return Some((SensorKind::DutyCycle, index));
        }
        let stem = file_name.strip_suffix("_input")?;
        [
            SensorKind::Temperature,
            SensorKind::Fan,
            SensorKind::Voltage,
            SensorKind::Power,
        ]
        .into_iter()
        .find_map(|kind| {
            let index = stem.strip_prefix(kind.prefix()).and_then(parse_index)?;
            Some((kind, index))
        })
    }
}

fn parse_index(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One numbered attribute as found on disk, before naming and filtering.
#[derive(Clone, Debug, PartialEq)]
pub struct RawReading {
    pub kind: SensorKind,
    pub index: u32,
    pub raw: i64,
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HwmonDevice {
    pub name: String,
    pub readings: Vec<RawReading>,
}

/// Walks `class/hwmon`. Devices and attribute files are visited in natural
/// order so repeated walks of the same tree agree.
pub fn read_hwmon_tree(root: &SysRoot) -> Result<Vec<HwmonDevice>, ReadError> {
    let base = root.hwmon_path();
    let dirs = sorted_entries(&base)?;
    Ok(dirs
        .into_iter()
        .filter(|path| path.is_dir())
        .map(|path| read_device(&path))
        .collect())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, ReadError> {
    let entries = fs::read_dir(dir).map_err(|source| ReadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_device(dir: &Path) -> HwmonDevice {
    let name = read_trimmed(&dir.join("name"))
        .ok()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| file_name(dir));

    let files = match sorted_entries(dir) {
        Ok(files) => files,
        Err(err) => {
            tracing::debug!(error = %err, device = %name, "unreadable hwmon device");
            Vec::new()
        }
    };

    let readings = files
        .iter()
        .filter_map(|path| {
            let (kind, index) = SensorKind::classify(&file_name(path))?;
            match read_parsed::<i64>(path) {
                Ok(raw) => Some(RawReading {
                    kind,
                    index,
                    raw,
                    label: read_label(dir, kind, index),
                }),
                Err(err) => {
                    tracing::debug!(error = %err, "skipping hwmon reading");
                    None
                }
            }
        })
        .collect();

    HwmonDevice { name, readings }
}

fn read_label(dir: &Path, kind: SensorKind, index: u32) -> Option<String> {
    let path = dir.join(format!("{}{index}_label", kind.prefix()));
    read_trimmed(&path).ok().filter(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_reading_files() {
        assert_eq!(SensorKind::classify("temp1_input"), Some((SensorKind::Temperature, 1)));
        assert_eq!(SensorKind::classify("fan12_input"), Some((SensorKind::Fan, 12)));
        assert_eq!(SensorKind::classify("in0_input"), Some((SensorKind::Voltage, 0)));
        assert_eq!(SensorKind::classify("power1_input"), Some((SensorKind::Power, 1)));
        assert_eq!(SensorKind::classify("pwm3"), Some((SensorKind::DutyCycle, 3)));
    }

    #[test]
    fn ignores_non_reading_files() {
        for name in [
            "name",
            "temp1_label",
            "temp1_max",
            "pwm1_enable",
            "pwm",
            "fan_input",
            "intrusion0_alarm",
            "tempx_input",
            "uevent",
        ] {
            assert_eq!(SensorKind::classify(name), None, "{name}");
        }
    }

    #[test]
    fn converts_units() {
        assert_eq!(SensorKind::Temperature.convert(45_500), 45.5);
        assert_eq!(SensorKind::Voltage.convert(1_200), 1.2);
        assert_eq!(SensorKind::Power.convert(15_250_000), 15.25);
        assert_eq!(SensorKind::Fan.convert(1180), 1180.0);
        assert_eq!(SensorKind::DutyCycle.convert(255), 100.0);
        assert_eq!(SensorKind::DutyCycle.convert(0), 0.0);
    }

    #[test]
    fn walks_devices_with_labels() {
        let dir = tempfile::tempdir().unwrap();
        let hwmon = dir.path().join("class/hwmon");
        let dev = hwmon.join("hwmon0");
        fs::create_dir_all(&dev).unwrap();
        fs::write(dev.join("name"), "k10temp\n").unwrap();
        fs::write(dev.join("temp1_input"), "48250\n").unwrap();
        fs::write(dev.join("temp1_label"), "Tctl\n").unwrap();
        fs::write(dev.join("temp3_input"), "garbage\n").unwrap();
        let unnamed = hwmon.join("hwmon10");
        fs::create_dir_all(&unnamed).unwrap();
        fs::write(unnamed.join("fan1_input"), "900\n").unwrap();

        let root = SysRoot::new(dir.path(), dir.path());
        let devices = read_hwmon_tree(&root).unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "k10temp");
        assert_eq!(
            devices[0].readings,
            vec![RawReading {
                kind: SensorKind::Temperature,
                index: 1,
                raw: 48250,
                label: Some("Tctl".to_string()),
            }]
        );
        assert_eq!(devices[1].name, "hwmon10");
        assert_eq!(devices[1].readings[0].kind, SensorKind::Fan);
        assert_eq!(devices[1].readings[0].label, None);
    }

    #[test]
    fn missing_tree_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = SysRoot::new(dir.path(), dir.path());
        assert!(read_hwmon_tree(&root).is_err());
    }
}
