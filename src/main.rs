use anyhow::Result;
use clap::Parser;
use mediasort::mediasort_core::organize::DEFAULT_CLOCK_SKEW_HOURS;
use mediasort::mediasort_core::{Cli, Commands, ExifToolSource, Organizer};
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use std::fs::File;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize loggers
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];

    if cli.log {
        loggers.push(WriteLogger::new(
            cli.log_level,
            Config::default(),
            File::create("mediasort.log")?,
        ));
    }

    CombinedLogger::init(loggers)?;

    match cli.command {
        Commands::Sort {
            input_dir,
            output_dir,
            dry_run,
            clock_skew_hours,
        } => {
            let mut organizer = Organizer::new(ExifToolSource::new(), clock_skew_hours);
            let stats = organizer.sort(&input_dir, &output_dir, dry_run)?;

            if dry_run {
                println!("\nDry run complete: {}", stats);
            } else {
                println!("\nSort complete!");
                println!("  {} photos moved", stats.photos_moved);
                println!("  {} videos moved", stats.videos_moved);
                if stats.unknown_skipped > 0 {
                    println!("  {} unknown files skipped", stats.unknown_skipped);
                }
                if stats.fallback_dates > 0 {
                    println!("  {} dated from file times", stats.fallback_dates);
                }
            }
        }

        Commands::Inspect { file, json } => {
            let mut organizer = Organizer::new(ExifToolSource::new(), DEFAULT_CLOCK_SKEW_HOURS);
            organizer.inspect(&file, json)?;
        }
    }

    Ok(())
}
