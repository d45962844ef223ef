//! Output formatting for command results.
//!
//! - [`text`] - one item per line
//! - [`json`] - JSON arrays, written incrementally

mod json;
mod text;

use serde::Serialize;
use std::error::Error;
use std::fmt::Display;
use std::io::Write;

pub use json::write_json_array;
pub use text::write_lines;

/// How results are printed.
#[derive(clap::ValueEnum, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One network or address per line.
    #[default]
    Text,
    /// A single JSON array of strings.
    Json,
}

/// Write `items` in the chosen format. Returns the number of items written.
pub fn emit<W, I, T>(out: &mut W, format: OutputFormat, items: I) -> Result<usize, Box<dyn Error>>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Display + Serialize,
{
    match format {
        OutputFormat::Text => Ok(write_lines(out, items)?),
        OutputFormat::Json => write_json_array(out, items),
    }
}
