//! Batch replay over historical bars
//!
//! Drives the swing detector and the momentum-shift engine over a bar series
//! in index order and collects everything they produce. Because the engine
//! is a pure function of bar order, the report is byte-identical to what the
//! same bars would yield fed one at a time from a live feed.

use serde::Serialize;

use crate::bar::Bar;
use crate::error::AnalysisError;
use crate::shift::{InefficiencyGap, MomentumLevel, MomentumShiftEngine, ShiftConfig, Signal};
use crate::swing::{SwingConfig, SwingDetector, SwingPoint};

/// Everything a replay produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub swing_points: Vec<SwingPoint>,
    pub gaps: Vec<InefficiencyGap>,
    pub signals: Vec<Signal>,
    /// Full level staircase, oldest first, final active level last
    pub levels: Vec<MomentumLevel>,
}

/// Replay a historical series through both components
///
/// Fewer than three bars cannot be evaluated at all and is an error; the
/// two warm-up steps inside a longer series are expected and absorbed here.
pub fn replay(
    bars: &[Bar],
    swing_config: SwingConfig,
    shift_config: ShiftConfig,
) -> Result<ReplayReport, AnalysisError> {
    if bars.len() < 3 {
        return Err(AnalysisError::InsufficientData {
            needed: 3,
            available: bars.len(),
        });
    }

    let detector = SwingDetector::new(swing_config)?;
    let swing_points = detector.detect(bars)?;

    let mut engine = MomentumShiftEngine::new(shift_config)?;
    let mut gaps = Vec::new();
    let mut signals = Vec::new();
    for (pos, bar) in bars.iter().enumerate() {
        match engine.step(bar) {
            Ok(outcome) => {
                gaps.extend(outcome.gap);
                signals.extend(outcome.signal);
            }
            Err(AnalysisError::InsufficientData { .. }) if pos < 2 => {}
            Err(e) => return Err(e),
        }
    }

    Ok(ReplayReport {
        swing_points,
        gaps,
        signals,
        levels: engine.staircase(),
    })
}
