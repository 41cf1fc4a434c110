//! Engine configuration and its validation errors.

use std::fmt;

use crate::{
    DEFAULT_COLS, DEFAULT_FREQUENCY, DEFAULT_KEYFRAMES, DEFAULT_MIN_FRAME_MS, DEFAULT_ROWS,
    MIN_COLS, MIN_ROWS,
};

/// Configuration rejected at construction time.
///
/// There is no runtime recovery path: a session is never built from an
/// invalid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroRows,
    ZeroCols,
    TooFewRows { rows: usize, min: usize },
    TooFewCols { cols: usize, min: usize },
    ZeroFrequency,
    ZeroKeyframes,
}

impl ConfigError {
    pub fn as_code(&self) -> &'static str {
        match self {
            ConfigError::ZeroRows | ConfigError::ZeroCols => "invalid_dimensions",
            ConfigError::TooFewRows { .. } | ConfigError::TooFewCols { .. } => "grid_too_small",
            ConfigError::ZeroFrequency | ConfigError::ZeroKeyframes => "invalid_cadence",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ConfigError::ZeroRows => "grid must have at least one row".to_string(),
            ConfigError::ZeroCols => "grid must have at least one column".to_string(),
            ConfigError::TooFewRows { rows, min } => {
                format!("grid has {} rows, at least {} are required", rows, min)
            }
            ConfigError::TooFewCols { cols, min } => {
                format!("grid has {} columns, at least {} are required", cols, min)
            }
            ConfigError::ZeroFrequency => "frequency must be at least 1".to_string(),
            ConfigError::ZeroKeyframes => "keyframes must be at least 1".to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.as_code(), self.message())
    }
}

impl std::error::Error for ConfigError {}

/// Fixed-for-a-session engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Grid height, floor row included.
    pub rows: usize,
    /// Grid width, both walls included.
    pub cols: usize,
    /// Accepted frames per input-response tick.
    pub frequency: u32,
    /// Input-response ticks per gravity tick.
    pub keyframes: u32,
    /// Frames arriving sooner than this after the last accepted one are dropped.
    pub min_frame_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            frequency: DEFAULT_FREQUENCY,
            keyframes: DEFAULT_KEYFRAMES,
            min_frame_ms: DEFAULT_MIN_FRAME_MS,
        }
    }
}

impl EngineConfig {
    /// Read overrides from `BLOCKS_*` environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults; range checks
    /// happen in [`EngineConfig::validate`].
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
            env::var(name)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        }

        let defaults = Self::default();
        Self {
            rows: parsed("BLOCKS_ROWS", defaults.rows),
            cols: parsed("BLOCKS_COLS", defaults.cols),
            frequency: parsed("BLOCKS_FREQUENCY", defaults.frequency),
            keyframes: parsed("BLOCKS_KEYFRAMES", defaults.keyframes),
            min_frame_ms: parsed("BLOCKS_MIN_FRAME_MS", defaults.min_frame_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.cols == 0 {
            return Err(ConfigError::ZeroCols);
        }
        if self.rows < MIN_ROWS {
            return Err(ConfigError::TooFewRows {
                rows: self.rows,
                min: MIN_ROWS,
            });
        }
        if self.cols < MIN_COLS {
            return Err(ConfigError::TooFewCols {
                cols: self.cols,
                min: MIN_COLS,
            });
        }
        if self.frequency == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        if self.keyframes == 0 {
            return Err(ConfigError::ZeroKeyframes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_values_are_rejected() {
        let base = EngineConfig::default();

        let c = EngineConfig { rows: 0, ..base };
        assert_eq!(c.validate(), Err(ConfigError::ZeroRows));

        let c = EngineConfig { cols: 0, ..base };
        assert_eq!(c.validate(), Err(ConfigError::ZeroCols));

        let c = EngineConfig { frequency: 0, ..base };
        assert_eq!(c.validate(), Err(ConfigError::ZeroFrequency));

        let c = EngineConfig { keyframes: 0, ..base };
        assert_eq!(c.validate(), Err(ConfigError::ZeroKeyframes));
    }

    #[test]
    fn narrow_grid_is_rejected() {
        let c = EngineConfig {
            cols: MIN_COLS - 1,
            ..EngineConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::TooFewCols {
                cols: MIN_COLS - 1,
                min: MIN_COLS
            })
        );
        assert_eq!(c.validate().unwrap_err().as_code(), "grid_too_small");
    }

    #[test]
    fn display_includes_code_and_message() {
        let text = ConfigError::ZeroKeyframes.to_string();
        assert_eq!(text, "invalid_cadence: keyframes must be at least 1");
    }
}
