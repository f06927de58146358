//! Swings command implementation

use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::data;
use crate::swing::SwingDetector;

#[derive(Args, Debug)]
pub struct SwingsArgs {
    /// CSV file of daily bars (date,open,high,low,close)
    pub input: PathBuf,
}

impl SwingsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let bars = data::load_bars(&self.input)?;
        let detector = SwingDetector::new((&config.swing).into())?;
        let points = detector.detect(&bars)?;

        println!("{} swing points in {} bars", points.len(), bars.len());
        for point in &points {
            println!(
                "  {:?} {} at bar {} (confirmed at {})",
                point.kind, point.price, point.anchor_index, point.confirmed_at_index
            );
        }
        Ok(())
    }
}
