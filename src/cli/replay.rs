//! Replay command implementation

use clap::Args;
use std::fs::File;
use std::path::PathBuf;

use crate::config::Config;
use crate::data;
use crate::replay::replay;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// CSV file of daily bars (date,open,high,low,close)
    pub input: PathBuf,

    /// Write crossing signals to this CSV file
    #[arg(long)]
    pub signals_out: Option<PathBuf>,

    /// Write the level staircase to this CSV file
    #[arg(long)]
    pub levels_out: Option<PathBuf>,

    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl ReplayArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let bars = data::load_bars(&self.input)?;
        tracing::info!(bars = bars.len(), input = %self.input.display(), "Loaded bars");

        let report = replay(&bars, (&config.swing).into(), (&config.shift).into())?;

        if let Some(path) = &self.signals_out {
            data::write_signals(File::create(path)?, &report.signals)?;
            tracing::info!(path = %path.display(), "Wrote signals");
        }
        if let Some(path) = &self.levels_out {
            data::write_levels(File::create(path)?, &report.levels)?;
            tracing::info!(path = %path.display(), "Wrote levels");
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!(
            "{} bars: {} swing points, {} gaps, {} levels",
            bars.len(),
            report.swing_points.len(),
            report.gaps.len(),
            report.levels.len()
        );
        for signal in &report.signals {
            println!(
                "  {:?} at bar {} (level {})",
                signal.kind, signal.bar_index, signal.reference_price
            );
        }
        Ok(())
    }
}
