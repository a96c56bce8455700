use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Overview {
    pub volunteers: i64,
    pub organizations: i64,
    pub coordinators: i64,
    pub active_initiatives: i64,
    pub completed_participations: i64,
    pub total_hours: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecentInitiative {
    pub title: String,
    pub category: String,
    pub start_date: NaiveDate,
    pub organization: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub overview: Overview,
    pub categories: Vec<CategoryCount>,
    pub recent_initiatives: Vec<RecentInitiative>,
}

#[derive(Debug, Clone, Default, Serialize, FromRow)]
pub struct SchoolStatistics {
    pub total_students: i64,
    pub total_participations: i64,
    pub total_hours: i64,
    pub total_certificates: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoordinatorReport {
    pub school_id: Option<i64>,
    pub statistics: SchoolStatistics,
    pub popular_categories: Vec<CategoryCount>,
    pub generated_at: NaiveDateTime,
}
