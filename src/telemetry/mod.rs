//! Telemetry module
//!
//! Structured logging only; the core itself emits tracing events and never
//! carries metrics or exporters.

mod logging;

pub use logging::init_logging;

use crate::config::TelemetrySettings;

/// Initialize telemetry from configuration
pub fn init_telemetry(settings: &TelemetrySettings) -> anyhow::Result<()> {
    init_logging(&settings.log_level)
}
