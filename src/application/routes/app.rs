use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;

use crate::application::routes::render_html;
use crate::application::services::refresh_dashboard;
use crate::application::state::AppState;
use crate::presentation::web::templates::{
    DashboardContentTemplate, DashboardPageTemplate, render_template,
};

pub(super) fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn dashboard_page(
    State(state): State<AppState>,
) -> Result<Html<String>, StatusCode> {
    let snapshot = refresh_dashboard(state.source.as_ref()).await;
    let computed_at = snapshot.dashboard.computed_at.clone();

    let content = render_template(DashboardContentTemplate::from_snapshot(snapshot)).map_err(
        |err| {
            tracing::error!(error = %err, "failed to render dashboard content");
            StatusCode::INTERNAL_SERVER_ERROR
        },
    )?;

    render_html(DashboardPageTemplate {
        version: crate::VERSION,
        computed_at,
        content,
    })
}

pub(crate) async fn health() -> &'static str {
    "ok"
}
