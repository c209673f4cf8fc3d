use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::stats::{CategoryStat, Dashboard, MonthlyStat, SummaryStats};
use crate::domain::records::{RawRecord, month_key};

/// Group records by order month, in the order months are first seen.
///
/// Records with an unreadable order date are skipped. [`build_dashboard`] reports how many.
pub fn aggregate_monthly(records: &[RawRecord]) -> Vec<MonthlyStat> {
    group_by_month(records).months
}

struct MonthlyGrouping {
    /// First-encounter order.
    months: Vec<MonthlyStat>,
    undated: u64,
}

fn group_by_month(records: &[RawRecord]) -> MonthlyGrouping {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut months: Vec<MonthlyStat> = Vec::new();
    let mut undated = 0u64;

    for record in records {
        let Some(date) = record.parsed_order_date() else {
            undated += 1;
            continue;
        };
        let key = month_key(date);

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            months.push(MonthlyStat {
                month: key,
                ..MonthlyStat::default()
            });
            months.len() - 1
        });
        let stat = &mut months[slot];

        stat.count += 1;
        stat.total_price = stat.total_price.saturating_add(record.price());
        if record.is_read() {
            stat.read_count += 1;
        }
        if let Some(rating) = record.effective_rating() {
            stat.total_rating = stat.total_rating.saturating_add(rating);
            stat.rating_count += 1;
        }
    }

    for stat in &mut months {
        let count = stat.count as f64;
        stat.avg_price = stat.total_price as f64 / count;
        stat.read_ratio = stat.read_count as f64 / count;
        stat.avg_rating = if stat.rating_count > 0 {
            stat.total_rating as f64 / stat.rating_count as f64
        } else {
            0.0
        };
    }

    MonthlyGrouping { months, undated }
}

fn sort_chronologically(months: &mut [MonthlyStat]) {
    months.sort_by(|a, b| a.month.cmp(&b.month));
}

/// [`aggregate_monthly`] sorted oldest month first.
pub fn aggregate_monthly_sorted(records: &[RawRecord]) -> Vec<MonthlyStat> {
    let mut months = aggregate_monthly(records);
    sort_chronologically(&mut months);
    months
}

/// Ordering of the monthly breakdown.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum MonthOrder {
    #[default]
    Chronological,
    /// Order in which each month first appears in the log.
    Encounter,
}

impl MonthOrder {
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "chronological" => Some(MonthOrder::Chronological),
            "encounter" => Some(MonthOrder::Encounter),
            _ => None,
        }
    }

    pub fn aggregate(self, records: &[RawRecord]) -> Vec<MonthlyStat> {
        match self {
            MonthOrder::Chronological => aggregate_monthly_sorted(records),
            MonthOrder::Encounter => aggregate_monthly(records),
        }
    }
}

/// Group records by their category label exactly as written.
pub fn aggregate_by_category(records: &[RawRecord]) -> Vec<CategoryStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<CategoryStat> = Vec::new();

    for record in records {
        let slot = *index.entry(record.category.as_str()).or_insert_with(|| {
            categories.push(CategoryStat {
                name: record.category.clone(),
                ..CategoryStat::default()
            });
            categories.len() - 1
        });
        let stat = &mut categories[slot];
        stat.count += 1;
        stat.total_price = stat.total_price.saturating_add(record.price());
    }

    categories
}

pub fn compute_summary(records: &[RawRecord]) -> SummaryStats {
    let mut summary = SummaryStats {
        total_books: records.len() as u64,
        ..SummaryStats::default()
    };
    let mut rating_sum = 0i64;
    let mut rated = 0u64;

    for record in records {
        if record.is_read() {
            summary.total_read += 1;
        }
        if let Some(rating) = record.effective_rating() {
            rating_sum = rating_sum.saturating_add(rating);
            rated += 1;
        }
        summary.total_spent = summary.total_spent.saturating_add(record.price());
    }

    summary.average_rating = (rated > 0).then(|| rating_sum as f64 / rated as f64);
    summary.read_ratio = (summary.total_books > 0)
        .then(|| summary.total_read as f64 / summary.total_books as f64);

    summary
}

/// Run every aggregation over the same records.
pub fn build_dashboard(records: &[RawRecord], computed_at: DateTime<Utc>) -> Dashboard {
    let MonthlyGrouping {
        mut months,
        undated,
    } = group_by_month(records);
    sort_chronologically(&mut months);

    Dashboard {
        summary: compute_summary(records),
        monthly: months,
        categories: aggregate_by_category(records),
        undated_records: undated,
        computed_at: computed_at.to_rfc3339(),
    }
}
