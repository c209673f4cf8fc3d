use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::SourceError;
use crate::domain::aggregate::build_dashboard;
use crate::domain::records::RawRecord;
use crate::domain::source::RecordSource;
use crate::domain::stats::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Error,
    Info,
}

/// User-facing message describing why the dashboard is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl From<&SourceError> for Notice {
    fn from(err: &SourceError) -> Self {
        let (title, description, level) = match err {
            SourceError::MissingApiKey => (
                "API key error",
                "No valid Google Sheets API key is configured. Check BOOKDASH_GOOGLE_API_KEY or your .env file.".to_string(),
                NoticeLevel::Error,
            ),
            SourceError::InvalidApiKey(_) => (
                "API key error",
                "The Google Sheets API key is invalid. Configure a valid API key.".to_string(),
                NoticeLevel::Error,
            ),
            SourceError::Api { message, .. } => ("API error", message.clone(), NoticeLevel::Error),
            SourceError::NoData => (
                "No data",
                "No rows were found in the spreadsheet.".to_string(),
                NoticeLevel::Info,
            ),
            SourceError::Transport(_) | SourceError::Decode(_) => (
                "Error",
                "Something went wrong while fetching the reading log.".to_string(),
                NoticeLevel::Error,
            ),
        };

        Notice {
            title: title.to_string(),
            description,
            level,
        }
    }
}

/// Result of one fetch. A failed fetch leaves `records` empty.
#[derive(Debug)]
pub struct LoadedRecords {
    pub records: Vec<RawRecord>,
    pub failure: Option<SourceError>,
}

impl LoadedRecords {
    pub fn notice(&self) -> Option<Notice> {
        self.failure.as_ref().map(Notice::from)
    }

    /// Compute one statistic over the loaded records, keeping the failure notice.
    pub fn envelope<T>(&self, compute: impl FnOnce(&[RawRecord]) -> T) -> StatsEnvelope<T> {
        StatsEnvelope {
            data: compute(&self.records),
            notice: self.notice(),
        }
    }

    /// Turn a degraded load back into the underlying error.
    pub fn into_strict(self) -> Result<Vec<RawRecord>, SourceError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Fetch the log once, substituting an empty sequence on failure.
pub async fn load_records(source: &dyn RecordSource) -> LoadedRecords {
    match source.fetch().await {
        Ok(records) => LoadedRecords {
            records,
            failure: None,
        },
        Err(err) => {
            warn!(error = %err, "fetch failed, continuing with an empty reading log");
            LoadedRecords {
                records: Vec::new(),
                failure: Some(err),
            }
        }
    }
}

/// Dashboard data plus the notice to show alongside it, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(flatten)]
    pub dashboard: Dashboard,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// A single statistic plus the notice explaining an empty result, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEnvelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// One refresh: fetch, then aggregate. Nothing is cached between calls.
pub async fn refresh_dashboard(source: &dyn RecordSource) -> DashboardSnapshot {
    let loaded = load_records(source).await;
    let notice = loaded.notice();

    let start = Instant::now();
    let dashboard = build_dashboard(&loaded.records, Utc::now());
    info!(
        records = loaded.records.len(),
        months = dashboard.monthly.len(),
        categories = dashboard.categories.len(),
        duration_us = start.elapsed().as_micros(),
        "dashboard computed"
    );

    DashboardSnapshot { dashboard, notice }
}
