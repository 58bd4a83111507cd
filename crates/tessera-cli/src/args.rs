//! Command-line argument definitions for the Tessera CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the figure file, output path and
//! format, configuration file selection, and logging verbosity.

use clap::Parser;

use tessera::export::Format;

/// Command-line arguments for the Tessera chart and diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input figure file
    #[arg(help = "Path to the input figure file (TOML)")]
    pub input: String,

    /// Path to the output file; defaults to `out.svg` or `out.html`
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format (svg, html, page)
    #[arg(short, long, default_value = "svg")]
    pub format: Format,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The output path, falling back to `out.<extension>` for the format.
    pub fn output_path(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("out.{}", self.format.extension()))
    }
}
