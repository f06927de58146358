//! Swing-point types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the price action a swing point marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwingKind {
    /// Confirmed local high (turning point down)
    High,
    /// Confirmed local low (turning point up)
    Low,
}

/// A confirmed turning point in the bar series
///
/// Created once per qualifying anchor and immutable afterwards. Downstream
/// consumers must never see a swing point before `confirmed_at_index` is
/// reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingPoint {
    /// Bar index of the extremum itself
    pub anchor_index: u64,
    pub kind: SwingKind,
    /// High of the anchor bar for a swing high, low for a swing low
    pub price: Decimal,
    /// `anchor_index + right`: first index at which the point is visible
    pub confirmed_at_index: u64,
}

impl SwingPoint {
    pub fn is_high(&self) -> bool {
        self.kind == SwingKind::High
    }

    pub fn is_low(&self) -> bool {
        self.kind == SwingKind::Low
    }
}
