use crate::application::services::{Notice, NoticeLevel};
use crate::domain::formatting::{
    category_label, format_percent, format_rating, format_thousands, format_yen, format_yen_avg,
};
use crate::domain::stats::{CategoryStat, MonthlyStat, SummaryStats};

/// Palette cycled across categories.
pub const CATEGORY_COLORS: &[&str] = &[
    "#F59E0B", "#10B981", "#3B82F6", "#8B5CF6", "#EC4899", "#6B7280",
];

const CHART_HEIGHT: f64 = 240.0;
const CHART_TOP: f64 = 16.0;
const CHART_BOTTOM: f64 = 28.0;
const SLOT_WIDTH: f64 = 56.0;
const MIN_CHART_WIDTH: f64 = 320.0;

pub fn category_color(index: usize) -> &'static str {
    CATEGORY_COLORS[index % CATEGORY_COLORS.len()]
}

pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub accent: &'static str,
}

pub fn stat_cards(summary: &SummaryStats) -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Total books",
            value: format_thousands(summary.total_books),
            accent: "#F59E0B",
        },
        StatCard {
            title: "Read",
            value: format_percent(summary.read_ratio),
            accent: "#10B981",
        },
        StatCard {
            title: "Average rating",
            value: format_rating(summary.average_rating),
            accent: "#3B82F6",
        },
        StatCard {
            title: "Total spent",
            value: format_yen(summary.total_spent),
            accent: "#8B5CF6",
        },
    ]
}

pub struct NoticeView {
    pub title: String,
    pub description: String,
    pub css_class: &'static str,
}

impl From<Notice> for NoticeView {
    fn from(notice: Notice) -> Self {
        Self {
            title: notice.title,
            description: notice.description,
            css_class: match notice.level {
                NoticeLevel::Error => "notice notice-error",
                NoticeLevel::Info => "notice notice-info",
            },
        }
    }
}

/// One month in the trend chart, in SVG user units.
pub struct TrendBarView {
    pub month: String,
    pub count: u64,
    pub read_ratio: String,
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
    pub label_x: String,
}

/// Purchases per month as bars, read ratio as a line on a 0-100% axis.
pub struct TrendChartView {
    pub width: String,
    pub height: String,
    pub baseline_y: String,
    pub label_y: String,
    pub max_count: u64,
    pub bars: Vec<TrendBarView>,
    /// `points` attribute for the read-ratio polyline.
    pub ratio_points: String,
}

fn fmt_unit(value: f64) -> String {
    format!("{value:.1}")
}

impl TrendChartView {
    pub fn from_months(months: &[MonthlyStat]) -> Self {
        let width = (months.len() as f64 * SLOT_WIDTH).max(MIN_CHART_WIDTH);
        let plot_height = CHART_HEIGHT - CHART_TOP - CHART_BOTTOM;
        let baseline = CHART_TOP + plot_height;
        let max_count = months.iter().map(|m| m.count).max().unwrap_or(0);

        let mut bars = Vec::with_capacity(months.len());
        let mut points = Vec::with_capacity(months.len());

        for (i, month) in months.iter().enumerate() {
            let slot_x = i as f64 * SLOT_WIDTH;
            let center = slot_x + SLOT_WIDTH / 2.0;
            let bar_height = if max_count == 0 {
                0.0
            } else {
                month.count as f64 / max_count as f64 * plot_height
            };
            let ratio = month.read_ratio.clamp(0.0, 1.0);
            let ratio_y = CHART_TOP + (1.0 - ratio) * plot_height;

            points.push(format!("{},{}", fmt_unit(center), fmt_unit(ratio_y)));
            bars.push(TrendBarView {
                month: month.month.clone(),
                count: month.count,
                read_ratio: format_percent(Some(month.read_ratio)),
                x: fmt_unit(slot_x + SLOT_WIDTH * 0.2),
                y: fmt_unit(baseline - bar_height),
                width: fmt_unit(SLOT_WIDTH * 0.6),
                height: fmt_unit(bar_height),
                label_x: fmt_unit(center),
            });
        }

        Self {
            width: fmt_unit(width),
            height: fmt_unit(CHART_HEIGHT),
            baseline_y: fmt_unit(baseline),
            label_y: fmt_unit(CHART_HEIGHT - 8.0),
            max_count,
            bars,
            ratio_points: points.join(" "),
        }
    }
}

pub struct CategorySliceView {
    pub name: String,
    pub count: u64,
    pub share: String,
    pub color: &'static str,
}

/// Category share of books, rendered as a CSS conic-gradient donut.
pub struct CategoryDistributionView {
    pub gradient: String,
    pub slices: Vec<CategorySliceView>,
}

impl CategoryDistributionView {
    pub fn from_categories(categories: &[CategoryStat]) -> Self {
        let total: u64 = categories.iter().map(|c| c.count).sum();
        if total == 0 {
            return Self {
                gradient: "conic-gradient(#E5E7EB 0% 100%)".to_string(),
                slices: Vec::new(),
            };
        }

        let mut stops = Vec::with_capacity(categories.len());
        let mut slices = Vec::with_capacity(categories.len());
        let mut start = 0.0;

        for (i, category) in categories.iter().enumerate() {
            let share = category.count as f64 / total as f64;
            let end = if i + 1 == categories.len() {
                100.0
            } else {
                start + share * 100.0
            };
            let color = category_color(i);
            stops.push(format!("{color} {start:.2}% {end:.2}%"));
            slices.push(CategorySliceView {
                name: category_label(&category.name).to_string(),
                count: category.count,
                share: format_percent(Some(share)),
                color,
            });
            start = end;
        }

        Self {
            gradient: format!("conic-gradient({})", stops.join(", ")),
            slices,
        }
    }
}

pub struct CategoryCardView {
    pub name: String,
    pub count: u64,
    pub avg_price: String,
    pub total_price: String,
    pub color: &'static str,
}

impl CategoryCardView {
    pub fn new(index: usize, category: &CategoryStat) -> Self {
        Self {
            name: category_label(&category.name).to_string(),
            count: category.count,
            avg_price: format_yen_avg(category.avg_price()),
            total_price: format_yen(category.total_price),
            color: category_color(index),
        }
    }
}

pub fn category_cards(categories: &[CategoryStat]) -> Vec<CategoryCardView> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| CategoryCardView::new(i, c))
        .collect()
}
