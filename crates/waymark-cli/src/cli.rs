//! Command line

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use waymark_geo::{AlertRadius, Coordinate};

#[derive(Debug, Parser)]
#[command(name = "waymark", version, about = "Proximity alerts for a single destination")]
pub struct Cli {
    /// TOML file with [tracker] and [client] tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Alert service base URL
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Evaluate alerts in process instead of calling a server
    #[arg(long, global = true)]
    pub local: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the tracking loop
    Track {
        /// Positions to replay, "lat,lng;lat,lng;..."
        #[arg(long, value_delimiter = ';')]
        route: Vec<Coordinate>,

        /// Destination to watch, "lat,lng"
        #[arg(long)]
        destination: Option<Coordinate>,

        /// Alert radius in meters
        #[arg(long)]
        radius: Option<AlertRadius>,

        /// Milliseconds between cycles
        #[arg(long)]
        interval: Option<u64>,

        /// Stop after this many seconds (runs until killed otherwise)
        #[arg(long)]
        duration: Option<u64>,

        /// Log every report at INFO
        #[arg(long)]
        log_cycles: bool,
    },

    /// Submit a destination once
    Destination {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        #[arg(long)]
        radius: Option<AlertRadius>,
    },

    /// Push an alert radius to the service
    Radius { meters: AlertRadius },

    /// Probe the service
    Status,
}

impl Cli {
    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
