use crate::mediasort_core::organize::DEFAULT_CLOCK_SKEW_HOURS;
use clap::{Parser, Subcommand};
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sorts photos and videos into year-month folders by creation date")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable file logging to mediasort.log
    #[arg(long = "log", global = true)]
    pub log: bool,

    /// Log level for file logging (debug, info, warn, error)
    #[arg(long, default_value_t = LevelFilter::Debug, global = true)]
    pub log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sort media files into year-month subdirectories
    Sort {
        /// Directory containing media to sort (direct children only)
        #[arg(required = true)]
        input_dir: PathBuf,

        /// Directory receiving the YYYYMM subdirectories
        #[arg(required = true)]
        output_dir: PathBuf,

        /// Show what would be moved without making changes
        #[arg(long)]
        dry_run: bool,

        /// Hours added to video and file-time dates to correct cameras
        /// that store a shifted clock (0 disables)
        #[arg(long, default_value_t = DEFAULT_CLOCK_SKEW_HOURS)]
        clock_skew_hours: i64,
    },

    /// Dump all metadata directories and the resolved date for one file
    Inspect {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Emit metadata as JSON
        #[arg(long)]
        json: bool,
    },
}
