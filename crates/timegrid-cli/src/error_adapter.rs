//! Error adapter for converting TimeGridError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use timegrid::TimeGridError;

/// Adapter for [`TimeGridError`] variants.
pub struct ErrorAdapter<'a>(pub &'a TimeGridError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TimeGridError::Io(_) => "timegrid::io",
            TimeGridError::Config(_) => "timegrid::config",
            TimeGridError::Input(_) => "timegrid::input",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TimeGridError::Config(_) => "check the [layout] and [grid] tables of the config file",
            TimeGridError::Input(_) => {
                "date-times are quoted strings such as \"2024-05-01T09:00:00\""
            }
            TimeGridError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`TimeGridError`] into a list of reportable errors.
pub fn to_reportables(err: &TimeGridError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}
