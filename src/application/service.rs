use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::{
    Entry, EntryId, filter_by_category, metrics, parse_cents, suggest_category, totals_by_category,
    totals_by_month,
};
use crate::io::{RowError, write_entries_csv};
use crate::storage::SnapshotStore;

use super::{AppError, CategorySummary, MonthlyTotal, Summary};

/// Application service providing the high-level ledger operations.
/// This is the primary interface for any front-end (CLI, web dashboard).
pub struct ExpenseService {
    store: SnapshotStore,
    entries: Vec<Entry>,
}

/// Outcome of a mutating operation.
///
/// A failed snapshot write does not roll the mutation back: the in-memory
/// ledger stays authoritative for the session and `save_warning` carries the
/// message to surface to the user.
#[derive(Debug)]
pub struct MutationResult {
    pub entry: Entry,
    pub save_warning: Option<String>,
}

impl ExpenseService {
    /// Open the ledger backed by the snapshot file at `path`.
    ///
    /// A missing file starts an empty ledger. Malformed snapshot rows are
    /// dropped individually and returned for reporting; the load itself
    /// never aborts over them.
    pub fn open(path: impl AsRef<Path>) -> Result<(Self, Vec<RowError>), AppError> {
        let store = SnapshotStore::new(path);
        let loaded = store.load()?;

        let service = Self {
            store,
            entries: loaded.entries,
        };
        Ok((service, loaded.rejected))
    }

    /// Validate and append a new expense, then snapshot.
    pub fn add(
        &mut self,
        date: &str,
        category: &str,
        amount: &str,
        note: &str,
    ) -> Result<MutationResult, AppError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(date.trim().to_string()))?;

        let category = category.trim();
        if category.is_empty() {
            return Err(AppError::EmptyCategory);
        }

        let amount_cents = parse_cents(amount).map_err(|err| AppError::InvalidAmount {
            value: amount.trim().to_string(),
            reason: err.to_string(),
        })?;
        if amount_cents < 0 {
            return Err(AppError::NegativeAmount(amount.trim().to_string()));
        }

        let entry = Entry::new(date, category, amount_cents).with_note(note.trim());
        self.entries.push(entry.clone());
        let save_warning = self.snapshot();

        Ok(MutationResult {
            entry,
            save_warning,
        })
    }

    /// Remove the expense with the given id, then snapshot.
    pub fn remove(&mut self, id: EntryId) -> Result<MutationResult, AppError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(AppError::EntryNotFound(id))?;

        let entry = self.entries.remove(index);
        let save_warning = self.snapshot();

        Ok(MutationResult {
            entry,
            save_warning,
        })
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries of the selected category; `None` or "All" means everything.
    pub fn filtered(&self, selection: Option<&str>) -> Vec<Entry> {
        filter_by_category(&self.entries, selection)
    }

    /// Distinct categories, sorted, for filter pickers.
    pub fn categories(&self) -> Vec<String> {
        totals_by_category(&self.entries).into_keys().collect()
    }

    /// Build the summary the charts and metric tiles render.
    pub fn summary(&self, selection: Option<&str>, as_of: NaiveDate) -> Summary {
        let entries = filter_by_category(&self.entries, selection);
        let metrics = metrics(&entries, as_of);

        let categories = totals_by_category(&entries)
            .into_iter()
            .map(|(category, total_cents)| CategorySummary {
                category,
                total_cents,
                percentage: if metrics.total_cents == 0 {
                    0.0
                } else {
                    total_cents as f64 / metrics.total_cents as f64 * 100.0
                },
            })
            .collect();

        let months = totals_by_month(&entries)
            .into_iter()
            .map(|(month, total_cents)| MonthlyTotal {
                month: month.to_string(),
                total_cents,
            })
            .collect();

        Summary {
            categories,
            months,
            metrics,
        }
    }

    /// Category suggestion for a note, recomputed from current state.
    pub fn suggest(&self, note: &str) -> Option<String> {
        suggest_category(note, &self.entries)
    }

    /// Serialize the full ledger to `writer` in the snapshot format.
    /// Returns the number of rows written.
    pub fn export<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        Ok(write_entries_csv(&self.entries, writer)?)
    }

    /// Path of the backing snapshot file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Write the full snapshot; a failure is reported, not fatal.
    fn snapshot(&self) -> Option<String> {
        match self.store.save(&self.entries) {
            Ok(()) => None,
            Err(err) => {
                let message = format!(
                    "changes not saved to {}: {err}",
                    self.store.path().display()
                );
                tracing::warn!("{message}");
                Some(message)
            }
        }
    }
}
