//! swing-shift: structural turning points and momentum-shift signals for
//! daily OHLC bars
//!
//! This library provides the core components for:
//! - Causal swing-point (fractal) identification with a confirmation lag
//! - Fair-value-gap detection in three-bar and group modes
//! - The staircase reference level and its crossing buy/sell signals
//! - Batch replay over historical bars
//! - CSV bar ingestion and report persistence

pub mod bar;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod replay;
pub mod shift;
pub mod swing;
pub mod telemetry;

pub use bar::Bar;
pub use error::AnalysisError;
