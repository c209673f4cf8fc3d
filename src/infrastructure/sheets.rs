use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::domain::SourceError;
use crate::domain::records::{MAX_RATING, RawRecord};
use crate::domain::source::RecordSource;

pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_SPREADSHEET_ID: &str = "1D0AQcFWpYuJs-WJWEc07V4uxqcHVP0LuKa2bMeuJ92w";
/// Row 1 holds the headers.
pub const DEFAULT_RANGE: &str = "Sheet1!A2:G";

/// Value shipped in the sample `.env`; treated the same as no key at all.
const PLACEHOLDER_API_KEY: &str = "your_google_api_key_here";
const USER_AGENT: &str = "bookdash/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Column positions in the sheet.
mod column {
    pub const ORDER_DATE: usize = 0;
    pub const TITLE: usize = 1;
    pub const READ_FLAG: usize = 2;
    pub const RATING: usize = 3;
    pub const FORMAT: usize = 4;
    pub const PRICE_YEN: usize = 5;
    pub const CATEGORY: usize = 6;
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub spreadsheet_id: String,
    pub range: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            base_url: SHEETS_API_URL.to_string(),
            api_key: None,
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            range: DEFAULT_RANGE.to_string(),
        }
    }
}

/// Reads the reading log from the Google Sheets `values` endpoint.
pub struct GoogleSheetsSource {
    http: reqwest::Client,
    config: SheetsConfig,
}

impl GoogleSheetsSource {
    pub fn new(config: SheetsConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self { http, config })
    }

    fn api_key(&self) -> Result<&str, SourceError> {
        match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => Ok(key),
            _ => Err(SourceError::MissingApiKey),
        }
    }

    fn values_url(&self, api_key: &str) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            SourceError::transport(format!("invalid Sheets URL {}: {e}", self.config.base_url))
        })?;

        url.path_segments_mut()
            .map_err(|()| {
                SourceError::transport(format!(
                    "Sheets URL cannot be a base: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.config.spreadsheet_id.as_str(),
                "values",
                self.config.range.as_str(),
            ]);
        url.query_pairs_mut().append_pair("key", api_key);

        Ok(url)
    }
}

#[async_trait]
impl RecordSource for GoogleSheetsSource {
    #[tracing::instrument(skip(self), fields(spreadsheet = %self.config.spreadsheet_id, range = %self.config.range))]
    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        let api_key = self.api_key()?;
        let url = self.values_url(api_key)?;
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::transport(e.without_url().to_string()))?;

        let records = parse_values_response(status, &body)?;

        info!(
            rows = records.len(),
            duration_ms = start.elapsed().as_millis(),
            "fetched reading log"
        );
        Ok(records)
    }
}

/// Interpret a `values` response body. Error bodies are checked before the
/// HTTP status so the API's own message is preserved.
pub fn parse_values_response(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<Vec<RawRecord>, SourceError> {
    let parsed: ValuesResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => {
            return Err(SourceError::api(status.to_string(), truncate(body)));
        }
        Err(e) => return Err(SourceError::decode(e.to_string())),
    };

    if let Some(error) = parsed.error {
        return Err(classify_api_error(error, status));
    }

    if !status.is_success() {
        return Err(SourceError::api(status.to_string(), truncate(body)));
    }

    let Some(values) = parsed.values else {
        return Err(SourceError::NoData);
    };

    debug!(rows = values.len(), "mapping sheet rows");
    Ok(values.iter().map(|row| record_from_row(row)).collect())
}

fn classify_api_error(error: ApiErrorBody, status: reqwest::StatusCode) -> SourceError {
    let message = error
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "Google Sheets API returned an error".to_string());

    match error.status.as_deref() {
        Some("INVALID_ARGUMENT") => SourceError::InvalidApiKey(message),
        Some(api_status) => SourceError::api(api_status, message),
        None => SourceError::api(status.to_string(), message),
    }
}

fn truncate(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Map one positional sheet row onto named fields. Missing trailing cells are empty.
pub fn record_from_row(row: &[Value]) -> RawRecord {
    let cell = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();

    RawRecord {
        order_date: cell(column::ORDER_DATE),
        title: cell(column::TITLE),
        read_flag: parse_read_flag(&cell(column::READ_FLAG)),
        rating: parse_rating(&cell(column::RATING)),
        format: cell(column::FORMAT),
        price_yen: cell(column::PRICE_YEN),
        category: cell(column::CATEGORY),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn parse_number(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64)
}

/// Blank and non-numeric flags mean unread.
fn parse_read_flag(text: &str) -> i64 {
    parse_number(text).unwrap_or(0)
}

/// Ratings outside `1..=MAX_RATING` (including `0`, the sheet's "unrated") are dropped.
fn parse_rating(text: &str) -> Option<i64> {
    if text.trim().is_empty() {
        return None;
    }
    parse_number(text).filter(|r| (1..=MAX_RATING).contains(r))
}

// --- Sheets API types ---

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}
