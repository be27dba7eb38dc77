use std::fs::{self, File};
use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::fmt::format::FmtSpan;

pub fn trace_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("sensortop").join("trace.jsonl"))
}

/// Sends spans and events to a JSON-lines file; the terminal belongs to the
/// dashboard.
pub fn init_file_log() -> Result<PathBuf> {
    let path = trace_log_path().ok_or_else(|| eyre!("no cache directory for the trace log"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::sync::Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(path)
}
