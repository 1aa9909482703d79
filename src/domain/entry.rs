use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type EntryId = Uuid;

/// A single recorded expense.
///
/// Entries carry a stable opaque id assigned at creation time, so removal and
/// later re-filtering keep targeting the same record after earlier deletions
/// have shifted positions in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// Calendar day the expense happened (no time component)
    pub date: NaiveDate,
    /// Short free-text label, never empty
    pub category: String,
    /// Amount in cents, never negative
    pub amount_cents: Cents,
    /// Free text, may be empty
    pub note: String,
}

impl Entry {
    pub fn new(date: NaiveDate, category: impl Into<String>, amount_cents: Cents) -> Self {
        assert!(amount_cents >= 0, "Entry amount must not be negative");
        Self {
            id: Uuid::new_v4(),
            date,
            category: category.into(),
            amount_cents,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// The (year, month) bucket this entry falls into.
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// Grouping key for monthly aggregation. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The immediately preceding calendar month.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
