use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct DamReport {
    pub id: i64,
    pub station_name: String,
    pub date: NaiveDate,
    pub current_storage: f64,
    pub usable_storage: f64,
    pub capacity: f64,
    pub created_by: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DamReportView {
    pub id: i64,
    pub station_name: String,
    pub date: String,
    pub current_storage: f64,
    pub usable_storage: f64,
    pub capacity: f64,
    pub created_by: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<DamReport> for DamReportView {
    fn from(r: DamReport) -> Self {
        Self {
            id: r.id,
            station_name: r.station_name,
            date: r.date.format("%Y-%m-%d").to_string(),
            current_storage: r.current_storage,
            usable_storage: r.usable_storage,
            capacity: r.capacity,
            created_by: r.created_by,
            status: r.status,
            created_at: r.created_at,
        }
    }
}
