//! CLI logic for the Timegrid layout tool.
//!
//! This module contains the core CLI logic: it reads an events file, lays
//! out one column, and writes the layout report.

pub mod error_adapter;

mod args;
mod config;
mod input;
mod report;

pub use args::Args;
pub use input::EventsFile;
pub use report::LayoutReport;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use timegrid::{ColumnLayoutBuilder, TimeGridError};

/// Run the Timegrid CLI application
///
/// This function lays out the events of the input file in a single column
/// and writes the resulting report to the output file, or to stdout when no
/// output path is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TimeGridError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Malformed events files
pub fn run(args: &Args) -> Result<(), TimeGridError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing events"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;
    let coords = app_config.grid().slat_coords()?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;
    let events = EventsFile::parse(&source)?;
    let column_date = events.column_date(args.date)?;
    let segments = events.segments()?;

    info!(column_date:% = column_date, events = events.len(); "Events loaded");

    let builder = ColumnLayoutBuilder::new(app_config.layout().clone());
    let layout = builder.layout(&segments, column_date, Some(&coords));
    let report = LayoutReport::new(column_date, &segments, &layout);
    let rendered = report.to_toml()?;

    match &args.output {
        Some(output) => {
            fs::write(output, rendered)?;
            info!(output_file = output, placed = report.placed_count(); "Layout report written");
        }
        None => {
            io::stdout().lock().write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}
