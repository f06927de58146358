//! Swing-point identification module
//!
//! Classifies bars as confirmed local highs/lows using a symmetric windowed
//! extremum rule with a tolerance band. A candidate is only confirmed once
//! its full right window has elapsed, so the output stream is causal: no
//! swing point is ever visible before `anchor_index + right`.

mod detector;
mod types;

pub use detector::{SwingConfig, SwingDetector};
pub use types::{SwingKind, SwingPoint};
