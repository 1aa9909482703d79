// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use spesa::application::ExpenseService;
use tempfile::TempDir;

/// Helper to create a test service backed by a temporary snapshot file
pub fn test_service() -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("expenses.csv");
    let (service, rejected) = ExpenseService::open(&path)?;
    assert!(rejected.is_empty());
    Ok((service, temp_dir))
}

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: the standard three-entry ledger
/// (Food 100 + 50 in January 2024, Transport 30 in February 2024)
pub struct SampleLedger;

impl SampleLedger {
    pub fn fill(service: &mut ExpenseService) -> Result<()> {
        service.add("2024-01-05", "Food", "100", "lunch")?;
        service.add("2024-01-20", "Food", "50", "")?;
        service.add("2024-02-01", "Transport", "30", "")?;
        Ok(())
    }
}
