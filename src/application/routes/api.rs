use axum::Json;
use axum::extract::{Query, State};
use axum::routing::get;
use serde::Deserialize;

use crate::application::errors::{ApiError, AppError};
use crate::application::services::{
    DashboardSnapshot, StatsEnvelope, load_records, refresh_dashboard,
};
use crate::application::state::AppState;
use crate::domain::aggregate::{MonthOrder, aggregate_by_category, compute_summary};
use crate::domain::stats::{CategoryStat, MonthlyStat, SummaryStats};

pub(super) fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/summary", get(get_summary))
        .route("/monthly", get(get_monthly))
        .route("/categories", get(get_categories))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(refresh_dashboard(state.source.as_ref()).await)
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_summary(
    State(state): State<AppState>,
) -> Json<StatsEnvelope<SummaryStats>> {
    let loaded = load_records(state.source.as_ref()).await;
    Json(loaded.envelope(compute_summary))
}

#[derive(Debug, Deserialize)]
pub(crate) struct MonthlyQuery {
    order: Option<String>,
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_monthly(
    State(state): State<AppState>,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<StatsEnvelope<Vec<MonthlyStat>>>, ApiError> {
    let order = match query.order.as_deref() {
        None | Some("") => MonthOrder::default(),
        Some(value) => MonthOrder::from_query(value).ok_or_else(|| {
            AppError::validation(format!(
                "invalid order '{value}': expected 'chronological' or 'encounter'"
            ))
        })?,
    };

    let loaded = load_records(state.source.as_ref()).await;
    Ok(Json(loaded.envelope(|records| order.aggregate(records))))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_categories(
    State(state): State<AppState>,
) -> Json<StatsEnvelope<Vec<CategoryStat>>> {
    let loaded = load_records(state.source.as_ref()).await;
    Json(loaded.envelope(aggregate_by_category))
}
