use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why an adapter came back empty-handed. The collector downgrades every
/// variant to an empty result; none of them reach the user.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("`{program}` failed: {reason}")]
    Command { program: String, reason: String },
}

/// Filesystem roots adapters read from. Production uses `/proc` and `/sys`;
/// tests point both at a scratch directory.
#[derive(Clone, Debug)]
pub struct SysRoot {
    proc: PathBuf,
    sys: PathBuf,
}

impl Default for SysRoot {
    fn default() -> Self {
        Self::new("/proc", "/sys")
    }
}

impl SysRoot {
    pub fn new(proc: impl Into<PathBuf>, sys: impl Into<PathBuf>) -> Self {
        Self {
            proc: proc.into(),
            sys: sys.into(),
        }
    }

    pub fn proc_path(&self, rel: &str) -> PathBuf {
        self.proc.join(rel)
    }

    pub fn sys_path(&self, rel: &str) -> PathBuf {
        self.sys.join(rel)
    }

    pub fn stat_path(&self) -> PathBuf {
        self.proc_path("stat")
    }

    pub fn cpuinfo_path(&self) -> PathBuf {
        self.proc_path("cpuinfo")
    }

    pub fn hwmon_path(&self) -> PathBuf {
        self.sys_path("class/hwmon")
    }

    /// The per-core counter interface is the one hard requirement.
    pub fn is_supported(&self) -> bool {
        self.stat_path().exists()
    }
}

pub fn read_text(path: &Path) -> Result<String, ReadError> {
    std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a single-value sysfs attribute, trimmed.
pub fn read_trimmed(path: &Path) -> Result<String, ReadError> {
    read_text(path).map(|s| s.trim().to_string())
}

pub fn read_parsed<T>(path: &Path) -> Result<T, ReadError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = read_trimmed(path)?;
    raw.parse().map_err(|e: T::Err| ReadError::Parse {
        path: path.to_path_buf(),
        reason: format!("{raw:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_root_points_at_live_system() {
        let root = SysRoot::default();
        assert_eq!(root.stat_path(), PathBuf::from("/proc/stat"));
        assert_eq!(root.hwmon_path(), PathBuf::from("/sys/class/hwmon"));
    }

    #[test]
    fn missing_stat_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let root = SysRoot::new(dir.path().join("proc"), dir.path().join("sys"));
        assert!(!root.is_supported());
    }

    #[test]
    fn read_parsed_reports_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp1_input");
        std::fs::write(&path, "not-a-number\n").unwrap();
        let err = read_parsed::<i64>(&path).unwrap_err();
        assert!(matches!(err, ReadError::Parse { .. }));

        std::fs::write(&path, "42000\n").unwrap();
        assert_eq!(read_parsed::<i64>(&path).unwrap(), 42000);
    }
}
