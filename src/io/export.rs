use std::io::Write;

use anyhow::Result;

use crate::domain::{Entry, format_cents};

/// Header row of the snapshot/export format.
pub const CSV_HEADER: [&str; 4] = ["Date", "Category", "Amount", "Note"];

/// Write entries in the flat tabular format: `Date,Category,Amount,Note`,
/// dates as `YYYY-MM-DD`, amounts with two decimals.
/// Returns the number of data rows written.
pub fn write_entries_csv<W: Write>(entries: &[Entry], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for entry in entries {
        csv_writer.write_record(&[
            entry.date.format("%Y-%m-%d").to_string(),
            entry.category.clone(),
            format_cents(entry.amount_cents),
            entry.note.clone(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(entries.len())
}
