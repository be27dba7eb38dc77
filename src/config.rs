use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::system::cpuinfo::BASE_FREQUENCY_FIELD;
use crate::system::sensors::{DEFAULT_ESSENTIAL_TEMPS, SensorPolicy};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cpu_info: CpuInfoConfig,
    pub sensors: SensorsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CpuInfoConfig {
    /// `lscpu` keys shown under "Additional CPU Info", in order.
    pub fields: Vec<String>,
}

impl Default for CpuInfoConfig {
    fn default() -> Self {
        CpuInfoConfig {
            fields: [
                "Thread(s) per core",
                "Core(s) per socket",
                "Stepping",
                "Frequency boost",
                "CPU(s) scaling MHz",
                "CPU max MHz",
                BASE_FREQUENCY_FIELD,
                "CPU min MHz",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorsConfig {
    pub essential_temps: Vec<String>,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
}

impl Default for SensorsConfig {
    fn default() -> Self {
        SensorsConfig {
            essential_temps: DEFAULT_ESSENTIAL_TEMPS.iter().map(|s| s.to_string()).collect(),
            temp_min_c: 0.0,
            temp_max_c: 150.0,
        }
    }
}

impl SensorsConfig {
    /// Allow-list entries are lowercased once here; matching relies on it.
    pub fn policy(&self) -> SensorPolicy {
        SensorPolicy {
            temp_min: self.temp_min_c,
            temp_max: self.temp_max_c,
            essential: self
                .essential_temps
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sensortop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            tracing::debug!(path = %path.display(), error = %err, "invalid config, using defaults");
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}
