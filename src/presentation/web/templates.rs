use askama::Template;

use super::views::{
    CategoryCardView, CategoryDistributionView, NoticeView, StatCard, TrendChartView,
    category_cards, stat_cards,
};
use crate::application::services::DashboardSnapshot;
use crate::domain::formatting::format_thousands;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardPageTemplate {
    pub version: &'static str,
    pub computed_at: String,
    pub content: String,
}

#[derive(Template)]
#[template(path = "partials/dashboard_content.html")]
pub struct DashboardContentTemplate {
    pub notice: Option<NoticeView>,
    pub has_data: bool,
    pub cards: Vec<StatCard>,
    pub trend: TrendChartView,
    pub distribution: CategoryDistributionView,
    pub categories: Vec<CategoryCardView>,
    /// Empty unless some rows were left out of the monthly chart.
    pub undated_note: String,
}

impl DashboardContentTemplate {
    pub fn from_snapshot(snapshot: DashboardSnapshot) -> Self {
        let DashboardSnapshot { dashboard, notice } = snapshot;

        let undated_note = match dashboard.undated_records {
            0 => String::new(),
            1 => "1 row without a readable order date is not shown in the monthly chart."
                .to_string(),
            n => format!(
                "{} rows without a readable order date are not shown in the monthly chart.",
                format_thousands(n)
            ),
        };

        Self {
            notice: notice.map(NoticeView::from),
            has_data: dashboard.has_data(),
            cards: stat_cards(&dashboard.summary),
            trend: TrendChartView::from_months(&dashboard.monthly),
            distribution: CategoryDistributionView::from_categories(&dashboard.categories),
            categories: category_cards(&dashboard.categories),
            undated_note,
        }
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, askama::Error> {
    template.render()
}
