use anyhow::{Context, Result};
use chrono::Utc;

use super::print_json;
use crate::application::services::{DashboardSnapshot, Notice, load_records};
use crate::domain::aggregate::{
    MonthOrder, aggregate_by_category, build_dashboard, compute_summary,
};
use crate::domain::records::RawRecord;
use crate::domain::source::RecordSource;

/// Fetch the log. Without `strict`, a failure is reported on stderr and
/// the statistics are computed over an empty log.
async fn fetch(
    source: &dyn RecordSource,
    strict: bool,
) -> Result<(Vec<RawRecord>, Option<Notice>)> {
    let loaded = load_records(source).await;
    if strict {
        let records = loaded
            .into_strict()
            .context("failed to fetch the reading log")?;
        return Ok((records, None));
    }

    let notice = loaded.notice();
    if let Some(notice) = &notice {
        eprintln!("{}: {}", notice.title, notice.description);
    }
    Ok((loaded.records, notice))
}

pub async fn summary(source: &dyn RecordSource, strict: bool) -> Result<()> {
    let (records, _) = fetch(source, strict).await?;
    print_json(&compute_summary(&records))
}

pub async fn monthly(source: &dyn RecordSource, strict: bool, unsorted: bool) -> Result<()> {
    let (records, _) = fetch(source, strict).await?;
    let order = if unsorted {
        MonthOrder::Encounter
    } else {
        MonthOrder::Chronological
    };
    print_json(&order.aggregate(&records))
}

pub async fn categories(source: &dyn RecordSource, strict: bool) -> Result<()> {
    let (records, _) = fetch(source, strict).await?;
    print_json(&aggregate_by_category(&records))
}

pub async fn dashboard(source: &dyn RecordSource, strict: bool) -> Result<()> {
    let (records, notice) = fetch(source, strict).await?;
    let snapshot = DashboardSnapshot {
        dashboard: build_dashboard(&records, Utc::now()),
        notice,
    };
    print_json(&snapshot)
}
