//! Bar ingestion and report persistence
//!
//! CSV only: daily bars come in as `date,open,high,low,close` rows and the
//! replay results go out as flat signal/level summaries. None of this
//! carries core semantics; the analysis never touches the filesystem.

mod csv;

pub use self::csv::{load_bars, read_bars, write_levels, write_signals};
