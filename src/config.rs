//! Configuration types for swing-shift

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::shift::{GapMode, ShiftConfig};
use crate::swing::SwingConfig;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub swing: SwingSettings,
    #[serde(default)]
    pub shift: ShiftSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

/// Swing detection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SwingSettings {
    /// Bars required left of a candidate extremum
    #[serde(default = "default_window")]
    pub left: usize,

    /// Bars required right of a candidate (confirmation lag)
    #[serde(default = "default_window")]
    pub right: usize,

    /// Tolerance band in percent for tying with the window extreme
    #[serde(default)]
    pub tolerance_pct: Decimal,
}

fn default_window() -> usize {
    2
}

impl Default for SwingSettings {
    fn default() -> Self {
        Self {
            left: 2,
            right: 2,
            tolerance_pct: Decimal::ZERO,
        }
    }
}

impl From<&SwingSettings> for SwingConfig {
    fn from(settings: &SwingSettings) -> Self {
        Self {
            left: settings.left,
            right: settings.right,
            tolerance_pct: settings.tolerance_pct,
        }
    }
}

/// Momentum-shift configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftSettings {
    /// Gap detection mode: "three_bar" or "group"
    #[serde(default = "default_mode")]
    pub mode: GapMode,

    /// Backward scan bound for group mode
    #[serde(default = "default_lookback")]
    pub lookback: usize,
}

fn default_mode() -> GapMode {
    GapMode::Group
}

fn default_lookback() -> usize {
    20
}

impl Default for ShiftSettings {
    fn default() -> Self {
        Self {
            mode: GapMode::Group,
            lookback: 20,
        }
    }
}

impl From<&ShiftSettings> for ShiftConfig {
    fn from(settings: &ShiftSettings) -> Self {
        Self {
            mode: settings.mode,
            lookback: settings.lookback,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
