pub mod dashboard;

pub use dashboard::{
    DashboardSnapshot, Notice, NoticeLevel, StatsEnvelope, load_records, refresh_dashboard,
};
