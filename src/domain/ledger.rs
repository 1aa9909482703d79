use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Cents, Entry, MonthKey};

/// Sentinel accepted by [`filter_by_category`] meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

/// Sum amounts per category over the given entries.
/// Strict partition: every entry lands in exactly one bucket.
pub fn totals_by_category(entries: &[Entry]) -> BTreeMap<String, Cents> {
    let mut totals: BTreeMap<String, Cents> = BTreeMap::new();

    for entry in entries {
        *totals.entry(entry.category.clone()).or_insert(0) += entry.amount_cents;
    }

    totals
}

/// Sum amounts per calendar month, chronologically ascending.
/// Months with no entries are omitted rather than zero-filled.
pub fn totals_by_month(entries: &[Entry]) -> BTreeMap<MonthKey, Cents> {
    let mut totals: BTreeMap<MonthKey, Cents> = BTreeMap::new();

    for entry in entries {
        *totals.entry(entry.month_key()).or_insert(0) += entry.amount_cents;
    }

    totals
}

/// Derived metrics over a set of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_cents: Cents,
    pub top_category: Option<String>,
    pub top_category_cents: Cents,
    /// Spend of the current partial month against the previous full month,
    /// in percent. Exactly 0.0 when the previous month had no spend.
    pub month_over_month_pct: f64,
}

/// Compute total spend, top category and the month-over-month delta.
///
/// The current-month window runs from the first day of `as_of`'s month
/// through `as_of` inclusive; the previous window is the full prior calendar
/// month. A tie on the top category resolves to the lexicographically
/// smallest name.
pub fn metrics(entries: &[Entry], as_of: NaiveDate) -> Metrics {
    let total_cents = entries.iter().map(|entry| entry.amount_cents).sum();

    let mut top_category = None;
    let mut top_category_cents = 0;
    for (category, cents) in totals_by_category(entries) {
        if top_category.is_none() || cents > top_category_cents {
            top_category = Some(category);
            top_category_cents = cents;
        }
    }

    let this_month = MonthKey::from_date(as_of);
    let last_month = this_month.previous();

    let mut this_month_cents: Cents = 0;
    let mut last_month_cents: Cents = 0;
    for entry in entries {
        let key = entry.month_key();
        if key == this_month && entry.date <= as_of {
            this_month_cents += entry.amount_cents;
        } else if key == last_month {
            last_month_cents += entry.amount_cents;
        }
    }

    // An empty previous month is defined as a 0% delta rather than an error.
    let month_over_month_pct = if last_month_cents == 0 {
        0.0
    } else {
        (this_month_cents - last_month_cents) as f64 / last_month_cents as f64 * 100.0
    };

    Metrics {
        total_cents,
        top_category,
        top_category_cents,
        month_over_month_pct,
    }
}

/// Suggest a category for `note` from historical entries.
///
/// Matching is case-insensitive on the trimmed note text; when several
/// entries share the same note, the most recently added one wins. Empty
/// notes never match.
pub fn suggest_category(note: &str, entries: &[Entry]) -> Option<String> {
    let wanted = note.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    entries
        .iter()
        .rev()
        .find(|entry| entry.note.trim().to_lowercase() == wanted)
        .map(|entry| entry.category.clone())
}

/// Keep only entries of the selected category; `None` or the "All" sentinel
/// keeps everything.
pub fn filter_by_category(entries: &[Entry], selection: Option<&str>) -> Vec<Entry> {
    match selection {
        None | Some(ALL_CATEGORIES) => entries.to_vec(),
        Some(category) => entries
            .iter()
            .filter(|entry| entry.category == category)
            .cloned()
            .collect(),
    }
}
