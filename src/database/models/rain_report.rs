use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RainReport {
    pub id: i64,
    pub station_name: String,
    pub date: NaiveDate,
    pub rain_amount: f64,
    pub tambon: String,
    pub amphoe: String,
    pub province: String,
    pub group_id: String,
    pub status: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RainReportView {
    pub id: i64,
    pub station_name: String,
    pub date: String,
    pub rain_amount: f64,
    pub tambon: String,
    pub amphoe: String,
    pub province: String,
    pub group_id: String,
    pub status: String,
    pub created_by: Option<String>,
}

impl From<RainReport> for RainReportView {
    fn from(r: RainReport) -> Self {
        Self {
            id: r.id,
            station_name: r.station_name,
            date: r.date.format("%Y-%m-%d").to_string(),
            rain_amount: r.rain_amount,
            tambon: r.tambon,
            amphoe: r.amphoe,
            province: r.province,
            group_id: r.group_id,
            status: r.status,
            created_by: r.created_by,
        }
    }
}
