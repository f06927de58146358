use clap::Parser;
use swing_shift::cli::{Cli, Commands};
use swing_shift::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    swing_shift::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Replay(args) => {
            tracing::info!("Starting replay");
            args.execute(&config)?;
        }
        Commands::Swings(args) => {
            tracing::info!("Detecting swing points");
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Swing: left={}, right={}, tolerance={}%",
                config.swing.left, config.swing.right, config.swing.tolerance_pct
            );
            println!(
                "  Shift: mode={:?}, lookback={}",
                config.shift.mode, config.shift.lookback
            );
            println!("  Log level: {}", config.telemetry.log_level);
        }
    }

    Ok(())
}
