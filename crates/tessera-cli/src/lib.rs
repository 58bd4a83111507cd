//! CLI logic for the Tessera renderer.
//!
//! This module contains the core CLI logic: load the configuration and the
//! figure file, render the figure, and write the markup to the output path.

pub mod error_adapter;
pub mod input;

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::{CliError, ConfigError, FigureError, TomlError};

use log::info;

use tessera::{Renderer, export::FileExporter};

/// Run the Tessera CLI application
///
/// This function renders the figure described by the input file and
/// writes the result to the output file. Nothing is written when the
/// figure cannot be rendered.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Figure file errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    let output_path = args.output_path();
    info!(
        input_path = args.input,
        output_path,
        format:% = args.format;
        "Processing figure"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let figure = input::load_figure(&args.input)?;

    let renderer = Renderer::new(app_config);
    renderer.export(&figure, args.format, &FileExporter::new(&output_path))?;

    info!(output_file = output_path; "Figure exported successfully");

    Ok(())
}
