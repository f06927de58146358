//! Windowed-extremum swing detection
//!
//! A candidate bar `p` is a swing low when its low ties for the lowest price
//! of the left window and of the right window, each side checked
//! independently within the tolerance band. Swing highs mirror the rule on
//! bar highs. Confirmation happens when the right window closes, which gives
//! every point a fixed lag of `right` bars.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::bar::{validate_series, Bar};
use crate::error::AnalysisError;

use super::types::{SwingKind, SwingPoint};

/// Configuration for swing detection
#[derive(Debug, Clone)]
pub struct SwingConfig {
    /// Bars required to the left of a candidate
    pub left: usize,

    /// Bars required to the right of a candidate (the confirmation lag)
    pub right: usize,

    /// Tolerance band in percent: how far from the true side extreme a
    /// candidate may sit and still count as tying for it
    pub tolerance_pct: Decimal,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            left: 2,
            right: 2,
            tolerance_pct: Decimal::ZERO,
        }
    }
}

impl SwingConfig {
    /// Reject unusable parameters up front, never at first use
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.left == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "left window must be positive".into(),
            ));
        }
        if self.right == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "right window must be positive".into(),
            ));
        }
        if self.tolerance_pct < Decimal::ZERO {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "tolerance must not be negative, got {}",
                self.tolerance_pct
            )));
        }
        Ok(())
    }
}

/// Causal swing-point detector
///
/// Pure function of the bar sequence and its three parameters: running
/// `detect` twice over the same bars yields an identical sequence.
#[derive(Debug)]
pub struct SwingDetector {
    config: SwingConfig,
}

impl SwingDetector {
    /// Create a detector, validating the configuration
    pub fn new(config: SwingConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a detector with default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: SwingConfig::default(),
        }
    }

    pub fn config(&self) -> &SwingConfig {
        &self.config
    }

    /// Scan the series and return every confirmed swing point
    ///
    /// Output is ordered by `confirmed_at_index` (ties by `anchor_index`).
    /// Candidates without a full window on both sides are skipped, not
    /// errors. A bar qualifying as both high and low on degenerate flat data
    /// is classified as a high.
    pub fn detect(&self, bars: &[Bar]) -> Result<Vec<SwingPoint>, AnalysisError> {
        validate_series(bars)?;

        let mut points = Vec::new();
        let needed = self.config.left + self.config.right + 1;
        if bars.len() < needed {
            return Ok(points);
        }

        // tolerance of 0 degrades to plain <= / >= extremum checks
        let low_band = Decimal::ONE + self.config.tolerance_pct / dec!(100);
        let high_band = Decimal::ONE - self.config.tolerance_pct / dec!(100);

        for p in self.config.left..=(bars.len() - 1 - self.config.right) {
            let candidate = &bars[p];
            let left = &bars[p - self.config.left..p];
            let right = &bars[p + 1..=p + self.config.right];

            let is_high = candidate.high >= side_max(left) * high_band
                && candidate.high >= side_max(right) * high_band;
            let is_low = candidate.low <= side_min(left) * low_band
                && candidate.low <= side_min(right) * low_band;

            // a bar is at most one of high/low; prefer high on flat data
            let (kind, price) = if is_high {
                (SwingKind::High, candidate.high)
            } else if is_low {
                (SwingKind::Low, candidate.low)
            } else {
                continue;
            };

            points.push(SwingPoint {
                anchor_index: candidate.index,
                kind,
                price,
                confirmed_at_index: candidate.index + self.config.right as u64,
            });
        }

        // The confirmation lag is constant, so ascending anchors are already
        // ascending by confirmation index.
        Ok(points)
    }
}

fn side_min(bars: &[Bar]) -> Decimal {
    bars.iter()
        .map(|b| b.low)
        .min()
        .unwrap_or(Decimal::MAX)
}

fn side_max(bars: &[Bar]) -> Decimal {
    bars.iter()
        .map(|b| b.high)
        .max()
        .unwrap_or(Decimal::MIN)
}
