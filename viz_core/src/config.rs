// config.rs - Visualizer settings: defaults, optional visualizer.toml, VIZ_* env overrides

use std::{fs, io, path::Path, str::FromStr, time::Duration};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::grid::{GRID_COLS, GRID_ROWS};

pub const CONFIG_FILE: &str = "visualizer.toml";

/// Largest grid side the painter and the per-step grid copies are sized for.
pub const MAX_GRID_SIDE: usize = 200;
/// Largest array the sort page draws one bar per value for.
pub const MAX_ARRAY_LEN: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub array_len: usize,
    pub step_delay_ms: u64,
    pub tone_duration_ms: u64,
    pub tone_volume: f32,
    pub audio_enabled: bool,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            grid_rows: GRID_ROWS,
            grid_cols: GRID_COLS,
            array_len: 100,
            step_delay_ms: 20,
            tone_duration_ms: 50,
            tone_volume: 0.1,
            audio_enabled: true,
        }
    }
}

impl VizConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` if it exists, then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        override_from(&lookup, "VIZ_GRID_ROWS", &mut self.grid_rows)?;
        override_from(&lookup, "VIZ_GRID_COLS", &mut self.grid_cols)?;
        override_from(&lookup, "VIZ_ARRAY_LEN", &mut self.array_len)?;
        override_from(&lookup, "VIZ_STEP_DELAY_MS", &mut self.step_delay_ms)?;
        override_from(&lookup, "VIZ_TONE_DURATION_MS", &mut self.tone_duration_ms)?;
        override_from(&lookup, "VIZ_TONE_VOLUME", &mut self.tone_volume)?;
        override_from(&lookup, "VIZ_AUDIO_ENABLED", &mut self.audio_enabled)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, side) in [("grid_rows", self.grid_rows), ("grid_cols", self.grid_cols)] {
            if !(1..=MAX_GRID_SIDE).contains(&side) {
                return Err(ConfigError::Invalid {
                    key,
                    reason: format!("must be between 1 and {MAX_GRID_SIDE}, got {side}"),
                });
            }
        }
        if !(1..=MAX_ARRAY_LEN).contains(&self.array_len) {
            return Err(ConfigError::Invalid {
                key: "array_len",
                reason: format!("must be between 1 and {MAX_ARRAY_LEN}, got {}", self.array_len),
            });
        }
        if !(0.0..=1.0).contains(&self.tone_volume) {
            return Err(ConfigError::Invalid {
                key: "tone_volume",
                reason: format!("must be within 0..=1, got {}", self.tone_volume),
            });
        }
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn tone_duration(&self) -> Duration {
        Duration::from_millis(self.tone_duration_ms)
    }
}

fn override_from<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    slot: &mut T,
) -> Result<(), ConfigError>
where
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(key) {
        *slot = raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
