//! CLI interface for deepnote

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Render gliding Deep Note voices to WAV
#[derive(Parser)]
#[command(name = "deepnote")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (-q warnings only, -qq errors only)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level selected by the -v and -q flags
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose as i16 - self.quiet as i16 {
            i16::MIN..=-2 => log::LevelFilter::Error,
            -1 => log::LevelFilter::Warn,
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render to a WAV file
    Render {
        /// Configuration file path
        #[arg(short, long, default_value = "deepnote.yaml")]
        config: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Duration in seconds (overrides the configuration)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Write a per-sample CSV trace of one voice
        #[arg(long)]
        trace: Option<PathBuf>,

        /// Voice to trace
        #[arg(long, default_value = "0")]
        trace_voice: usize,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "deepnote.yaml")]
        config: PathBuf,
    },

    /// Create an example configuration file
    Init,
}
