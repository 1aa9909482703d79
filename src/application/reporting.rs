use serde::{Deserialize, Serialize};

use crate::domain::{Cents, Metrics};

/// Everything the summary views render: category shares for the pie chart,
/// monthly totals for the bar chart, and the headline metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub categories: Vec<CategorySummary>,
    pub months: Vec<MonthlyTotal>,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_cents: Cents,
    /// Share of the summed total, 0.0 when there is no spend at all.
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Month label in `YYYY-MM` form
    pub month: String,
    pub total_cents: Cents,
}
