use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BridgeConfig {
    #[serde(default)]
    pub sleep: SleepConfig,
}

/// Policy knob for the script-visible `sleep` capability. The robot's own
/// runtime imposes no bound, so the default is unbounded; operators who want
/// a ceiling set `max_seconds`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SleepConfig {
    #[serde(default)]
    pub max_seconds: Option<f64>,
}

impl SleepConfig {
    /// The cap as a `Duration`, or `None` when no usable bound is configured.
    /// Negative and non-finite values carry no sensible bound and are ignored
    /// with a warning; values too large for `Duration` already exceed any real
    /// delay, so they mean unbounded too. Config input never panics the
    /// bridge.
    pub fn cap(&self) -> Option<Duration> {
        let secs = self.max_seconds?;
        if !secs.is_finite() || secs < 0.0 {
            warn!("ignoring invalid sleep cap of {secs} seconds");
            return None;
        }
        Duration::try_from_secs_f64(secs).ok()
    }
}

impl BridgeConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading bridge config '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Parsing bridge config '{}'", path.display()))
    }
}
