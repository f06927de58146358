//! Daily bar data model
//!
//! Bars are owned by the caller and never mutated by the core. The feed is
//! expected to be strictly time-ordered and gap-free in index terms; both
//! properties are validated here and violations surface as
//! [`AnalysisError::MalformedBar`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// A single immutable daily price bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Monotonic, contiguous position in the feed
    pub index: u64,
    /// Trading day of the bar
    pub timestamp: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl Bar {
    pub fn new(
        index: u64,
        timestamp: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> Self {
        Self {
            index,
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Check the bar's internal consistency
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.high < self.low {
            return Err(AnalysisError::MalformedBar {
                index: self.index,
                reason: format!("high {} below low {}", self.high, self.low),
            });
        }
        Ok(())
    }
}

/// Validate a full bar series: per-bar consistency, contiguous indices,
/// strictly increasing timestamps.
pub fn validate_series(bars: &[Bar]) -> Result<(), AnalysisError> {
    for bar in bars {
        bar.validate()?;
    }
    for pair in bars.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.index != prev.index + 1 {
            return Err(AnalysisError::MalformedBar {
                index: next.index,
                reason: format!("index does not follow {}", prev.index),
            });
        }
        if next.timestamp <= prev.timestamp {
            return Err(AnalysisError::MalformedBar {
                index: next.index,
                reason: format!(
                    "timestamp {} not after {}",
                    next.timestamp, prev.timestamp
                ),
            });
        }
    }
    Ok(())
}
