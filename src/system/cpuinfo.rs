use std::collections::BTreeMap;
use std::fmt;
use std::process::Command;

use super::source::{ReadError, SysRoot, read_parsed};

/// Logical CPU index as reported by the kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoreId(pub u32);

impl fmt::Display for CoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Current clock speed per core, in MHz.
pub type FrequencySample = BTreeMap<CoreId, f64>;

pub const MODEL_NAME: &str = "Model name";
/// Synthesized field, filled from sysfs rather than `lscpu`.
pub const BASE_FREQUENCY_FIELD: &str = "CPU base MHz";

/// Descriptors captured once at startup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticCpuInfo {
    pub fields: BTreeMap<String, String>,
    pub base_frequency: Option<String>,
}

impl StaticCpuInfo {
    pub fn model_name(&self) -> &str {
        self.fields
            .get(MODEL_NAME)
            .map(String::as_str)
            .unwrap_or("Unknown CPU")
    }

    /// Looks up a display field, resolving the synthesized base frequency.
    pub fn field(&self, key: &str) -> Option<&str> {
        if key == BASE_FREQUENCY_FIELD {
            return self.base_frequency.as_deref();
        }
        self.fields.get(key).map(String::as_str)
    }
}

pub fn read_static_info(root: &SysRoot) -> StaticCpuInfo {
    let fields = match run_lscpu() {
        Ok(stdout) => parse_key_values(&stdout),
        Err(err) => {
            tracing::debug!(error = %err, "static cpu info unavailable");
            BTreeMap::new()
        }
    };
    StaticCpuInfo {
        fields,
        base_frequency: read_base_frequency(root),
    }
}

fn run_lscpu() -> Result<String, ReadError> {
    let output = Command::new("lscpu")
        .output()
        .map_err(|e| ReadError::Command {
            program: "lscpu".to_string(),
            reason: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(ReadError::Command {
            program: "lscpu".to_string(),
            reason: format!("exited with {}", output.status),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parses `key: value` lines, splitting on the first colon.
pub fn parse_key_values(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Nominal frequency from ACPI CPPC (MHz), else the cpufreq maximum (kHz).
pub fn read_base_frequency(root: &SysRoot) -> Option<String> {
    let cppc = root.sys_path("devices/system/cpu/cpu0/acpi_cppc/nominal_freq");
    let cpufreq = root.sys_path("devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq");

    let ghz = match read_parsed::<u64>(&cppc) {
        Ok(mhz) => mhz as f64 / 1_000.0,
        Err(cppc_err) => match read_parsed::<u64>(&cpufreq) {
            Ok(khz) => khz as f64 / 1_000_000.0,
            Err(err) => {
                tracing::debug!(cppc = %cppc_err, cpufreq = %err, "no base frequency");
                return None;
            }
        },
    };
    Some(format!("{ghz:.2} GHz"))
}

pub fn read_frequencies(root: &SysRoot) -> Result<FrequencySample, ReadError> {
    let text = super::source::read_text(&root.cpuinfo_path())?;
    Ok(parse_frequencies(&text))
}

/// Pairs each `processor : N` line with the `cpu MHz : F` line after it.
pub fn parse_frequencies(text: &str) -> FrequencySample {
    let mut freqs = FrequencySample::new();
    let mut current: Option<CoreId> = None;
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key == "processor" {
            current = value.trim().parse().ok().map(CoreId);
        } else if key == "cpu MHz"
            && let Some(id) = current
            && let Ok(mhz) = value.trim().parse::<f64>()
        {
            freqs.insert(id, mhz);
        }
    }
    freqs
}
