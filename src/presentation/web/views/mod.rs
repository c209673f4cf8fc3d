mod dashboard;

pub use dashboard::{
    CATEGORY_COLORS, CategoryCardView, CategoryDistributionView, CategorySliceView, NoticeView,
    StatCard, TrendBarView, TrendChartView, category_cards, category_color, stat_cards,
};
