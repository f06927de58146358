//! CSV reading and writing for bars, signals, and levels

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::bar::Bar;
use crate::shift::{MomentumLevel, Signal};

/// One input row of daily bar data
#[derive(Debug, Deserialize)]
struct BarRow {
    date: NaiveDate,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
}

/// Read bars from CSV with a `date,open,high,low,close` header
///
/// Indices are assigned sequentially in file order; ordering and OHLC
/// consistency are checked later by the core, not here.
pub fn read_bars<R: Read>(reader: R) -> anyhow::Result<Vec<Bar>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();
    for (pos, row) in csv_reader.deserialize::<BarRow>().enumerate() {
        let row = row.with_context(|| format!("bar row {}", pos + 1))?;
        bars.push(Bar::new(
            pos as u64,
            row.date,
            row.open,
            row.high,
            row.low,
            row.close,
        ));
    }
    Ok(bars)
}

/// Load bars from a CSV file on disk
pub fn load_bars(path: impl AsRef<Path>) -> anyhow::Result<Vec<Bar>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("opening bar file {}", path.display()))?;
    read_bars(file)
}

/// Write crossing signals as `bar_index,kind,reference_price`
pub fn write_signals<W: Write>(writer: W, signals: &[Signal]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["bar_index", "kind", "reference_price"])?;
    for signal in signals {
        csv_writer.write_record([
            signal.bar_index.to_string(),
            format!("{:?}", signal.kind).to_lowercase(),
            signal.reference_price.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the level staircase as `effective_from_index,kind,price`
pub fn write_levels<W: Write>(writer: W, levels: &[MomentumLevel]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["effective_from_index", "kind", "price"])?;
    for level in levels {
        csv_writer.write_record([
            level.effective_from_index.to_string(),
            format!("{:?}", level.kind).to_lowercase(),
            level.price.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
