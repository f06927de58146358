//! Inefficiency-gap state machine
//!
//! The engine consumes one bar per `step` call, scans for a fair-value gap,
//! applies the staircase level update, and only then evaluates the crossing
//! rule against whatever level is active after the update. Streaming a feed
//! bar-by-bar and replaying the same bars in a batch produce identical
//! output: nothing here depends on arrival time.

use std::collections::VecDeque;

use rust_decimal::Decimal;

use crate::bar::Bar;
use crate::error::AnalysisError;

use super::types::{
    GapKind, GapMode, InefficiencyGap, MomentumLevel, Signal, SignalKind, StepOutcome,
};

/// Configuration for the momentum-shift engine
#[derive(Debug, Clone)]
pub struct ShiftConfig {
    /// Gap detection mode
    pub mode: GapMode,

    /// Maximum backward scan distance for group mode. Must be positive so
    /// the per-step scan stays bounded; a value below 2 cannot describe a
    /// gap (no bar fits inside the inefficiency). Ignored in three-bar mode.
    pub lookback: usize,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            mode: GapMode::Group,
            lookback: 20,
        }
    }
}

impl ShiftConfig {
    /// Classic three-bar fair value gap configuration
    pub fn three_bar() -> Self {
        Self {
            mode: GapMode::ThreeBar,
            lookback: 2,
        }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.lookback == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "lookback must be a positive bound".into(),
            ));
        }
        Ok(())
    }
}

/// Momentum-shift engine
///
/// Owns the only long-lived mutable state of the core: the active reference
/// level and its append-only history. One engine instance per instrument;
/// no sharing.
#[derive(Debug)]
pub struct MomentumShiftEngine {
    config: ShiftConfig,
    /// Rolling window of the most recent bars, bounded by the scan distance
    window: VecDeque<Bar>,
    bars_seen: usize,
    level: Option<MomentumLevel>,
    history: Vec<MomentumLevel>,
}

impl MomentumShiftEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: ShiftConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let capacity = Self::scan_distance(&config) + 1;
        Ok(Self {
            config,
            window: VecDeque::with_capacity(capacity),
            bars_seen: 0,
            level: None,
            history: Vec::new(),
        })
    }

    /// Create an engine with default (group-mode) configuration
    pub fn with_defaults() -> Self {
        Self::new(ShiftConfig::default()).expect("default config is valid")
    }

    pub fn config(&self) -> &ShiftConfig {
        &self.config
    }

    /// Number of bars accepted so far
    pub fn bars_seen(&self) -> usize {
        self.bars_seen
    }

    /// The currently active reference level, if any gap has been seen
    pub fn active_level(&self) -> Option<&MomentumLevel> {
        self.level.as_ref()
    }

    /// Superseded levels in installation order
    pub fn history(&self) -> &[MomentumLevel] {
        &self.history
    }

    fn scan_distance(config: &ShiftConfig) -> usize {
        match config.mode {
            GapMode::ThreeBar => 2,
            GapMode::Group => config.lookback,
        }
    }

    /// Feed the next bar and evaluate it
    ///
    /// A malformed bar is rejected before any state changes, so the step is
    /// atomic. The first two bars are admitted into the window but reported
    /// as [`AnalysisError::InsufficientData`] since no three-bar window can
    /// be formed yet.
    pub fn step(&mut self, bar: &Bar) -> Result<StepOutcome, AnalysisError> {
        bar.validate()?;
        if let Some(last) = self.window.back() {
            if bar.index != last.index + 1 {
                return Err(AnalysisError::MalformedBar {
                    index: bar.index,
                    reason: format!("index does not follow {}", last.index),
                });
            }
            if bar.timestamp <= last.timestamp {
                return Err(AnalysisError::MalformedBar {
                    index: bar.index,
                    reason: format!("timestamp {} not after {}", bar.timestamp, last.timestamp),
                });
            }
        }

        self.window.push_back(bar.clone());
        if self.window.len() > Self::scan_distance(&self.config) + 1 {
            self.window.pop_front();
        }
        self.bars_seen += 1;

        if self.bars_seen < 3 {
            return Err(AnalysisError::InsufficientData {
                needed: 3,
                available: self.bars_seen,
            });
        }

        // Gap replacement resolves first; the crossing below is evaluated
        // against the newly installed level.
        let gap = self.detect_gap();
        if let Some(gap) = &gap {
            if let Some(prev) = self.level.take() {
                self.history.push(prev);
            }
            self.level = Some(MomentumLevel {
                price: gap.center_price(),
                kind: gap.kind,
                effective_from_index: gap.trigger_bar_index,
            });
            tracing::debug!(
                kind = ?gap.kind,
                center = %gap.center_price(),
                boundary = gap.boundary_bar_index,
                trigger = gap.trigger_bar_index,
                "Installed new momentum level"
            );
        }

        let signal = self.evaluate_crossing();
        if let Some(signal) = &signal {
            tracing::debug!(
                kind = ?signal.kind,
                bar = signal.bar_index,
                level = %signal.reference_price,
                "Crossing signal"
            );
        }

        Ok(StepOutcome {
            bar_index: bar.index,
            gap,
            signal,
            level: self.level.clone(),
        })
    }

    /// Scan backward for the nearest gapped bar
    ///
    /// The scan starts two bars back (one full bar must sit inside the
    /// inefficiency; three-bar mode is the fixed `distance == 2` case) and
    /// stops on the first qualifying index. At a given index the bearish and
    /// bullish conditions are mutually exclusive; bearish is checked first
    /// so the preference is deterministic either way.
    fn detect_gap(&self) -> Option<InefficiencyGap> {
        let n = self.window.len();
        let current = &self.window[n - 1];
        let max_distance = Self::scan_distance(&self.config).min(n - 1);

        for distance in 2..=max_distance {
            let prior = &self.window[n - 1 - distance];
            if prior.low > current.high {
                return Some(InefficiencyGap {
                    kind: GapKind::Bearish,
                    upper_boundary: prior.low,
                    lower_boundary: current.high,
                    boundary_bar_index: prior.index,
                    trigger_bar_index: current.index,
                });
            }
            if prior.high < current.low {
                return Some(InefficiencyGap {
                    kind: GapKind::Bullish,
                    upper_boundary: current.low,
                    lower_boundary: prior.high,
                    boundary_bar_index: prior.index,
                    trigger_bar_index: current.index,
                });
            }
        }
        None
    }

    /// Strict crossing of the active level by consecutive closes
    ///
    /// A buy breaks a bearish level and flips it bullish in place (the
    /// broken resistance becomes the new reference); sell is symmetric. The
    /// flip mutates `kind` only, so the history keeps one entry per
    /// installing bar.
    fn evaluate_crossing(&mut self) -> Option<Signal> {
        let level = self.level.as_mut()?;
        let n = self.window.len();
        let prev_close = self.window[n - 2].close;
        let current = &self.window[n - 1];

        match level.kind {
            GapKind::Bearish if prev_close <= level.price && current.close > level.price => {
                level.kind = level.kind.opposite();
                Some(Signal {
                    kind: SignalKind::Buy,
                    bar_index: current.index,
                    reference_price: level.price,
                })
            }
            GapKind::Bullish if prev_close >= level.price && current.close < level.price => {
                level.kind = level.kind.opposite();
                Some(Signal {
                    kind: SignalKind::Sell,
                    bar_index: current.index,
                    reference_price: level.price,
                })
            }
            _ => None,
        }
    }

    /// Every level the engine has installed, oldest first, active level last
    pub fn staircase(&self) -> Vec<MomentumLevel> {
        let mut levels = self.history.clone();
        if let Some(active) = &self.level {
            levels.push(active.clone());
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bar(index: u64, low: Decimal, high: Decimal, close: Decimal) -> Bar {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        Bar::new(
            index,
            start + chrono::Days::new(index),
            close,
            high,
            low,
            close,
        )
    }

    fn feed(engine: &mut MomentumShiftEngine, bars: &[Bar]) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        for (pos, b) in bars.iter().enumerate() {
            match engine.step(b) {
                Ok(out) => outcomes.push(out),
                Err(AnalysisError::InsufficientData { .. }) if pos < 2 => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        outcomes
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let err = MomentumShiftEngine::new(ShiftConfig {
            mode: GapMode::Group,
            lookback: 0,
        })
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_warmup_reports_insufficient_data() {
        let mut engine = MomentumShiftEngine::with_defaults();
        let first = engine.step(&bar(0, dec!(8), dec!(10), dec!(9)));
        assert!(matches!(
            first,
            Err(AnalysisError::InsufficientData {
                needed: 3,
                available: 1
            })
        ));
        let second = engine.step(&bar(1, dec!(9), dec!(11), dec!(10)));
        assert!(matches!(
            second,
            Err(AnalysisError::InsufficientData {
                needed: 3,
                available: 2
            })
        ));
        // warm-up bars were still admitted: the third step evaluates
        let third = engine.step(&bar(2, dec!(13), dec!(15), dec!(14)));
        assert!(third.is_ok());
    }

    #[test]
    fn test_three_bar_bullish_gap() {
        // Low[2] = 13 > High[0] = 10: boundaries (13, 10), center 11.5
        let mut engine = MomentumShiftEngine::new(ShiftConfig::three_bar()).unwrap();
        let outcomes = feed(
            &mut engine,
            &[
                bar(0, dec!(8), dec!(10), dec!(9)),
                bar(1, dec!(9), dec!(11), dec!(10)),
                bar(2, dec!(13), dec!(15), dec!(14)),
            ],
        );

        let gap = outcomes[0].gap.as_ref().expect("bullish gap");
        assert_eq!(gap.kind, GapKind::Bullish);
        assert_eq!(gap.upper_boundary, dec!(13));
        assert_eq!(gap.lower_boundary, dec!(10));
        assert_eq!(gap.boundary_bar_index, 0);
        assert_eq!(gap.trigger_bar_index, 2);
        assert_eq!(gap.center_price(), dec!(11.5));

        let level = engine.active_level().expect("level installed");
        assert_eq!(level.price, dec!(11.5));
        assert_eq!(level.kind, GapKind::Bullish);
        assert_eq!(level.effective_from_index, 2);
        assert!(outcomes[0].signal.is_none());
    }

    #[test]
    fn test_three_bar_bearish_gap() {
        // High[2] = 94 < Low[0] = 98: boundaries (98, 94), center 96
        let mut engine = MomentumShiftEngine::new(ShiftConfig::three_bar()).unwrap();
        let outcomes = feed(
            &mut engine,
            &[
                bar(0, dec!(98), dec!(105), dec!(100)),
                bar(1, dec!(96), dec!(104), dec!(98)),
                bar(2, dec!(90), dec!(94), dec!(92)),
            ],
        );

        let gap = outcomes[0].gap.as_ref().expect("bearish gap");
        assert_eq!(gap.kind, GapKind::Bearish);
        assert_eq!(gap.upper_boundary, dec!(98));
        assert_eq!(gap.lower_boundary, dec!(94));
        assert_eq!(gap.center_price(), dec!(96));
    }

    /// Buy on upward cross of a bearish level, which flips bullish in place.
    #[test]
    fn test_buy_crossing_flips_level() {
        let mut engine = MomentumShiftEngine::new(ShiftConfig::three_bar()).unwrap();
        let outcomes = feed(
            &mut engine,
            &[
                bar(0, dec!(103), dec!(108), dec!(105)),
                bar(1, dec!(101), dec!(106), dec!(103)),
                // bearish gap: High = 97 < Low[0] = 103, center 100
                bar(2, dec!(92), dec!(97), dec!(95)),
                bar(3, dec!(94), dec!(102), dec!(99)),
                // close crosses 100 from 99
                bar(4, dec!(96), dec!(103), dec!(101)),
                // close crosses back down from 101
                bar(5, dec!(95), dec!(102), dec!(99)),
            ],
        );

        assert_eq!(
            engine.active_level().map(|l| l.price),
            Some(dec!(100)),
            "level price never changes on crossings"
        );

        let buy = outcomes[2].signal.as_ref().expect("buy signal");
        assert_eq!(buy.kind, SignalKind::Buy);
        assert_eq!(buy.bar_index, 4);
        assert_eq!(buy.reference_price, dec!(100));
        assert_eq!(outcomes[2].level.as_ref().unwrap().kind, GapKind::Bullish);

        let sell = outcomes[3].signal.as_ref().expect("sell signal");
        assert_eq!(sell.kind, SignalKind::Sell);
        assert_eq!(sell.bar_index, 5);
        assert_eq!(sell.reference_price, dec!(100));
        assert_eq!(engine.active_level().unwrap().kind, GapKind::Bearish);

        // in-place flips never archive: only the installing gap is on record
        assert!(engine.history().is_empty());
        assert_eq!(engine.active_level().unwrap().effective_from_index, 2);
    }

    #[test]
    fn test_no_signal_without_strict_cross() {
        let mut engine = MomentumShiftEngine::new(ShiftConfig::three_bar()).unwrap();
        let outcomes = feed(
            &mut engine,
            &[
                bar(0, dec!(103), dec!(108), dec!(105)),
                bar(1, dec!(101), dec!(106), dec!(103)),
                bar(2, dec!(92), dec!(97), dec!(95)), // bearish level at 100
                // close stays below the level: no cross
                bar(3, dec!(94), dec!(102), dec!(99)),
                // prev close 99 <= 100 but close 100 is not strictly above
                bar(4, dec!(96), dec!(103), dec!(100)),
            ],
        );
        assert!(outcomes.iter().all(|o| o.signal.is_none()));
    }

    /// A bar that installs a gap and would also cross the replaced level
    /// produces no signal: the crossing is evaluated against the new level.
    #[test]
    fn test_same_bar_gap_suppresses_crossing() {
        let mut engine = MomentumShiftEngine::new(ShiftConfig::three_bar()).unwrap();
        let outcomes = feed(
            &mut engine,
            &[
                bar(0, dec!(8), dec!(10), dec!(9)),
                bar(1, dec!(9), dec!(11), dec!(10)),
                // bullish gap (13, 10), level Bullish at 11.5
                bar(2, dec!(13), dec!(15), dec!(14)),
                // bearish gap: High = 8.5 < Low[1] = 9, and close falls from
                // 14 through the old 11.5 level
                bar(3, dec!(7), dec!(8.5), dec!(8)),
            ],
        );

        let last = &outcomes[1];
        let gap = last.gap.as_ref().expect("bearish replacement gap");
        assert_eq!(gap.kind, GapKind::Bearish);
        assert!(last.signal.is_none(), "crossing of replaced level suppressed");

        let level = engine.active_level().unwrap();
        assert_eq!(level.kind, GapKind::Bearish);
        assert_eq!(level.price, dec!(8.75));

        // the bullish level was archived, not merged
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history()[0].price, dec!(11.5));
    }

    #[test]
    fn test_group_mode_prefers_nearest_boundary() {
        // Both two back (bearish) and three back (bullish) qualify at bar 3;
        // the nearer boundary wins regardless of kind.
        let mut engine = MomentumShiftEngine::new(ShiftConfig {
            mode: GapMode::Group,
            lookback: 5,
        })
        .unwrap();
        let outcomes = feed(
            &mut engine,
            &[
                bar(0, dec!(4), dec!(5), dec!(4.5)),
                bar(1, dec!(20), dec!(22), dec!(21)),
                bar(2, dec!(6), dec!(21), dec!(7)),
                bar(3, dec!(10), dec!(12), dec!(11)),
            ],
        );

        let gap = outcomes
            .last()
            .unwrap()
            .gap
            .as_ref()
            .expect("gap at bar 3");
        assert_eq!(gap.kind, GapKind::Bearish);
        assert_eq!(gap.boundary_bar_index, 1);
        assert_eq!(gap.upper_boundary, dec!(20));
        assert_eq!(gap.lower_boundary, dec!(12));
    }

    #[test]
    fn test_group_lookback_bounds_the_scan() {
        // Gap exists only against bar 0 at distance 3; lookback 2 misses it
        let bars = [
            bar(0, dec!(4), dec!(5), dec!(4.5)),
            bar(1, dec!(6), dec!(9), dec!(7)),
            bar(2, dec!(4.8), dec!(9.5), dec!(8)),
            bar(3, dec!(7), dec!(9.8), dec!(9)),
        ];

        let mut near = MomentumShiftEngine::new(ShiftConfig {
            mode: GapMode::Group,
            lookback: 2,
        })
        .unwrap();
        let outcomes = feed(&mut near, &bars);
        assert!(outcomes.iter().all(|o| o.gap.is_none()));

        let mut far = MomentumShiftEngine::new(ShiftConfig {
            mode: GapMode::Group,
            lookback: 3,
        })
        .unwrap();
        let outcomes = feed(&mut far, &bars);
        let gap = outcomes.last().unwrap().gap.as_ref().expect("distant gap");
        assert_eq!(gap.kind, GapKind::Bullish);
        assert_eq!(gap.boundary_bar_index, 0);
    }

    #[test]
    fn test_group_lookback_two_matches_three_bar() {
        let bars: Vec<Bar> = [
            (100.0, 104.0, 102.0),
            (103.0, 107.0, 105.0),
            (108.0, 112.0, 110.0),
            (106.0, 111.0, 107.0),
            (96.0, 101.0, 98.0),
            (95.0, 100.0, 97.0),
            (102.0, 106.0, 104.0),
            (103.0, 108.0, 105.0),
            (94.0, 99.0, 96.0),
        ]
        .iter()
        .enumerate()
        .map(|(i, (low, high, close))| {
            bar(
                i as u64,
                Decimal::try_from(*low).unwrap(),
                Decimal::try_from(*high).unwrap(),
                Decimal::try_from(*close).unwrap(),
            )
        })
        .collect();

        let mut three = MomentumShiftEngine::new(ShiftConfig::three_bar()).unwrap();
        let mut group = MomentumShiftEngine::new(ShiftConfig {
            mode: GapMode::Group,
            lookback: 2,
        })
        .unwrap();

        let a = feed(&mut three, &bars);
        let b = feed(&mut group, &bars);
        assert_eq!(a, b);
        assert_eq!(three.staircase(), group.staircase());
    }

    #[test]
    fn test_staircase_history_strictly_ordered() {
        let mut engine = MomentumShiftEngine::new(ShiftConfig::three_bar()).unwrap();
        feed(
            &mut engine,
            &[
                bar(0, dec!(8), dec!(10), dec!(9)),
                bar(1, dec!(9), dec!(11), dec!(10)),
                bar(2, dec!(13), dec!(15), dec!(14)), // bullish gap
                bar(3, dec!(14), dec!(16), dec!(15)),
                bar(4, dec!(17), dec!(19), dec!(18)), // bullish gap vs bar 2
                bar(5, dec!(16), dec!(18), dec!(17)),
                bar(6, dec!(12), dec!(15), dec!(13)),
            ],
        );

        let staircase = engine.staircase();
        assert!(staircase.len() >= 2);
        assert!(staircase
            .windows(2)
            .all(|w| w[0].effective_from_index < w[1].effective_from_index));
    }

    #[test]
    fn test_malformed_bar_leaves_state_unchanged() {
        let good = [
            bar(0, dec!(8), dec!(10), dec!(9)),
            bar(1, dec!(9), dec!(11), dec!(10)),
            bar(2, dec!(13), dec!(15), dec!(14)),
        ];

        let mut engine = MomentumShiftEngine::new(ShiftConfig::three_bar()).unwrap();
        feed(&mut engine, &good);

        // inverted high/low
        let bad = Bar::new(
            3,
            NaiveDate::from_ymd_opt(2024, 6, 6).unwrap(),
            dec!(14),
            dec!(13),
            dec!(15),
            dec!(14),
        );
        assert!(matches!(
            engine.step(&bad),
            Err(AnalysisError::MalformedBar { index: 3, .. })
        ));

        // index gap
        let skipped = bar(5, dec!(14), dec!(16), dec!(15));
        assert!(matches!(
            engine.step(&skipped),
            Err(AnalysisError::MalformedBar { index: 5, .. })
        ));

        // the rejected bars did not advance the engine
        assert_eq!(engine.bars_seen(), 3);
        let next = engine.step(&bar(3, dec!(14), dec!(16), dec!(15))).unwrap();
        assert_eq!(next.bar_index, 3);
    }

    #[test]
    fn test_non_monotonic_timestamp_rejected() {
        let mut engine = MomentumShiftEngine::with_defaults();
        let _ = engine.step(&bar(0, dec!(8), dec!(10), dec!(9)));

        let mut stale = bar(1, dec!(9), dec!(11), dec!(10));
        stale.timestamp = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert!(matches!(
            engine.step(&stale),
            Err(AnalysisError::MalformedBar { index: 1, .. })
        ));
    }
}
