use serde::{Deserialize, Serialize};

/// Purchase and reading totals for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStat {
    /// `YYYY-MM`
    pub month: String,
    pub count: u64,
    pub total_price: u64,
    pub total_rating: i64,
    pub rating_count: u64,
    pub read_count: u64,
    pub avg_price: f64,
    /// Fraction of the month's books that have been read, in `0.0..=1.0`.
    pub read_ratio: f64,
    /// Zero when no book in the month is rated.
    pub avg_rating: f64,
}

/// Book count and spend for one category label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub name: String,
    pub count: u64,
    pub total_price: u64,
}

impl CategoryStat {
    pub fn avg_price(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_price as f64 / self.count as f64
        }
    }
}

/// Headline numbers over the whole log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_books: u64,
    pub total_read: u64,
    /// `None` when no book is rated.
    pub average_rating: Option<f64>,
    pub total_spent: u64,
    /// `None` for an empty log.
    pub read_ratio: Option<f64>,
}

/// Everything the dashboard renders, from a single aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub summary: SummaryStats,
    /// Chronological.
    pub monthly: Vec<MonthlyStat>,
    /// First-encounter order.
    pub categories: Vec<CategoryStat>,
    /// Records left out of `monthly` because their order date could not be read.
    #[serde(default)]
    pub undated_records: u64,
    pub computed_at: String,
}

impl Dashboard {
    pub fn has_data(&self) -> bool {
        self.summary.total_books > 0
    }
}
