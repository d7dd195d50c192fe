//! Command-line argument definitions for the figlint tools.
//!
//! [`Args`] drives the `figlint` checker and [`FeedbackArgs`] drives
//! `figlint-feedback`. Both are parsed with [`clap`] and share the
//! configuration file and logging options.

use clap::Parser;

/// Check SVG figures for overlapping text, lines and boxes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SVG files to check (defaults to every *.svg in the figures directory)
    #[arg(help = "SVG files to check")]
    pub files: Vec<String>,

    /// Show element counts for each file
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Ask a hosted model for feedback on an SVG figure
#[derive(Parser, Debug)]
#[command(name = "figlint-feedback", author, version, about, long_about = None)]
pub struct FeedbackArgs {
    /// Path to the SVG figure
    #[arg(help = "Path to the SVG figure")]
    pub file: String,

    /// Model name (defaults to the configured model)
    pub model: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
