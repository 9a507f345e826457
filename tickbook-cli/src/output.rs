//! Top-of-book record formatting.

use crate::config::OutputFormat;
use std::fmt;
use std::io::{self, Write};
use tickbook_book::TopOfBook;

/// Text rendering of a top-of-book record.
///
/// Every field is wrapped in braces and prices carry two decimals:
/// `{1}, {100.00}, {2}, {100.50}, {3}`.
#[derive(Debug, Clone, Copy)]
pub struct TextRecord<'a>(pub &'a TopOfBook);

impl fmt::Display for TextRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = self.0;
        write!(
            f,
            "{{{}}}, {{{:.2}}}, {{{}}}, {{{:.2}}}, {{{}}}",
            top.timestamp, top.bid.price, top.bid.quantity, top.ask.price, top.ask.quantity
        )
    }
}

/// Writes one record followed by a newline.
///
/// # Errors
/// Returns an I/O error if the writer fails.
pub fn write_record<W: Write>(
    writer: &mut W,
    top: &TopOfBook,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(writer, "{}", TextRecord(top)),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, top).map_err(io::Error::from)?;
            writeln!(writer)
        }
    }
}
