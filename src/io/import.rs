use std::io::Read;

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::{Entry, parse_cents};

/// Result of reading a snapshot or import file.
#[derive(Debug, Clone)]
pub struct CsvLoad {
    pub entries: Vec<Entry>,
    pub rejected: Vec<RowError>,
}

/// A row that failed to parse. The row is dropped; the load carries on.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Read entries from the flat tabular format.
///
/// Malformed rows are rejected one by one and reported through
/// [`CsvLoad::rejected`]; a bad row never aborts the whole read.
pub fn read_entries_csv<R: Read>(reader: R) -> Result<CsvLoad> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    let mut rejected = Vec::new();

    for (row, result) in csv_reader.records().enumerate() {
        let line = row + 2; // the header occupies line 1

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                rejected.push(RowError {
                    line,
                    field: None,
                    error: format!("CSV parse error: {err}"),
                });
                continue;
            }
        };

        let date_str = record.get(0).unwrap_or("").trim();
        let category = record.get(1).unwrap_or("").trim();
        let amount_str = record.get(2).unwrap_or("");
        let note = record.get(3).unwrap_or("");

        let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(date) => date,
            Err(err) => {
                rejected.push(RowError {
                    line,
                    field: Some("Date".to_string()),
                    error: format!("invalid date '{date_str}': {err}"),
                });
                continue;
            }
        };

        if category.is_empty() {
            rejected.push(RowError {
                line,
                field: Some("Category".to_string()),
                error: "category is empty".to_string(),
            });
            continue;
        }

        let amount_cents = match parse_cents(amount_str) {
            Ok(cents) if cents >= 0 => cents,
            Ok(_) => {
                rejected.push(RowError {
                    line,
                    field: Some("Amount".to_string()),
                    error: format!("negative amount '{}'", amount_str.trim()),
                });
                continue;
            }
            Err(err) => {
                rejected.push(RowError {
                    line,
                    field: Some("Amount".to_string()),
                    error: format!("invalid amount '{}': {err}", amount_str.trim()),
                });
                continue;
            }
        };

        entries.push(Entry::new(date, category, amount_cents).with_note(note));
    }

    Ok(CsvLoad { entries, rejected })
}
