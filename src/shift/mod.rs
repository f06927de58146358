//! Momentum-shift module
//!
//! Detects fair-value-gap inefficiencies in the bar stream, maintains the
//! single active reference level of the staircase model, and emits buy/sell
//! signals on qualifying closing-price crossings of that level.

mod engine;
mod types;

pub use engine::{MomentumShiftEngine, ShiftConfig};
pub use types::{
    GapKind, GapMode, InefficiencyGap, MomentumLevel, Signal, SignalKind, StepOutcome,
};
