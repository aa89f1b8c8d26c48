use crate::error::{PadCycleError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_FACE_INTERVAL_MS: u64 = 300;
const DEFAULT_DPAD_INTERVAL_MS: u64 = 100;

/// Timer cadence for the two button patterns.
///
/// Read from `<config_dir>/padcycle/config.json` when present. Missing fields
/// (or a missing file) fall back to the built-in 300ms / 100ms intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub face_interval_ms: u64,
    pub dpad_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            face_interval_ms: DEFAULT_FACE_INTERVAL_MS,
            dpad_interval_ms: DEFAULT_DPAD_INTERVAL_MS,
        }
    }
}

/// Validated intervals handed to the input loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub face: Duration,
    pub dpad: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            face: Duration::from_millis(DEFAULT_FACE_INTERVAL_MS),
            dpad: Duration::from_millis(DEFAULT_DPAD_INTERVAL_MS),
        }
    }
}

impl Settings {
    fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| PadCycleError::Config("Cannot find config directory".into()))?
            .join("padcycle");
        Ok(dir.join("config.json"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// A missing file means defaults. Nothing is written back.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn timing(&self) -> Result<Timing> {
        if self.face_interval_ms == 0 {
            return Err(PadCycleError::Config(
                "face_interval_ms must be greater than zero".into(),
            ));
        }
        if self.dpad_interval_ms == 0 {
            return Err(PadCycleError::Config(
                "dpad_interval_ms must be greater than zero".into(),
            ));
        }
        Ok(Timing {
            face: Duration::from_millis(self.face_interval_ms),
            dpad: Duration::from_millis(self.dpad_interval_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("padcycle-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_match_hardcoded_cadence() {
        let timing = Settings::default().timing().unwrap();
        assert_eq!(timing, Timing::default());
        assert_eq!(timing.face, Duration::from_millis(300));
        assert_eq!(timing.dpad, Duration::from_millis(100));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("padcycle-does-not-exist/config.json");
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_default() {
        let path = scratch_file("partial.json", r#"{ "dpad_interval_ms": 50 }"#);
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.face_interval_ms, 300);
        assert_eq!(settings.dpad_interval_ms, 50);
    }

    #[test]
    fn malformed_file_is_a_json_error() {
        let path = scratch_file("broken.json", "{ not json");
        assert!(matches!(
            Settings::load_from(&path),
            Err(PadCycleError::Json(_))
        ));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let settings = Settings {
            face_interval_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.timing(), Err(PadCycleError::Config(_))));

        let settings = Settings {
            dpad_interval_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.timing(), Err(PadCycleError::Config(_))));
    }
}
