//! Momentum-shift types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a structural inefficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapKind {
    /// Price jumped up, leaving unfilled range below
    Bullish,
    /// Price dropped, leaving unfilled range above
    Bearish,
}

impl GapKind {
    pub fn opposite(&self) -> Self {
        match self {
            GapKind::Bullish => GapKind::Bearish,
            GapKind::Bearish => GapKind::Bullish,
        }
    }
}

/// Gap detection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapMode {
    /// Classic fair value gap against the bar two back
    ThreeBar,
    /// Backward scan for the nearest gapped bar within `lookback`
    Group,
}

/// A detected price inefficiency
///
/// At most one gap is emitted per evaluated bar; immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InefficiencyGap {
    pub kind: GapKind,
    pub upper_boundary: Decimal,
    pub lower_boundary: Decimal,
    /// Index of the prior bar whose extreme forms the far boundary
    pub boundary_bar_index: u64,
    /// Index of the bar that completed the gap
    pub trigger_bar_index: u64,
}

impl InefficiencyGap {
    /// Midpoint of the gap, used as the new reference level
    pub fn center_price(&self) -> Decimal {
        (self.upper_boundary + self.lower_boundary) / Decimal::TWO
    }
}

/// The single active reference level of the staircase model
///
/// Replaced wholesale by every new gap; the superseded value is archived to
/// the engine's history, never merged or partially adjusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumLevel {
    pub price: Decimal,
    pub kind: GapKind,
    /// Bar index at which the installing gap was detected
    pub effective_from_index: u64,
}

/// Trading signal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Buy,
    Sell,
}

/// A crossing signal against the active level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    /// Bar whose close completed the crossing
    pub bar_index: u64,
    /// The level price that was crossed
    pub reference_price: Decimal,
}

/// Everything one `step` call produced for a single bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub bar_index: u64,
    pub gap: Option<InefficiencyGap>,
    pub signal: Option<Signal>,
    /// Snapshot of the active level after this bar's updates
    pub level: Option<MomentumLevel>,
}
