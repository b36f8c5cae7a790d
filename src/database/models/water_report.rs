use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct WaterReport {
    pub id: i64,
    pub station_name: String,
    pub tambon: String,
    pub amphoe: String,
    pub province: String,
    pub report_date: NaiveDate,
    pub water_level: f64,
    pub capacity: f64,
    pub current_volume: f64,
    pub inflow: f64,
    pub outflow: f64,
    pub status: String,
    pub created_by: Option<String>,
    pub group_id: String,
}

/// Wire shape for the dashboard: camelCase keys, the date flattened to a
/// plain `YYYY-MM-DD` string and percent-full computed at read time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterReportView {
    pub id: i64,
    pub station_name: String,
    pub tambon: String,
    pub amphoe: String,
    pub province: String,
    pub date: String,
    pub water_level: f64,
    pub capacity: f64,
    pub current: f64,
    pub inflow: f64,
    pub outflow: f64,
    pub percent: f64,
    pub status: String,
    pub created_by: Option<String>,
    pub group_id: String,
}

impl From<WaterReport> for WaterReportView {
    fn from(r: WaterReport) -> Self {
        Self {
            id: r.id,
            station_name: r.station_name,
            tambon: r.tambon,
            amphoe: r.amphoe,
            province: r.province,
            date: r.report_date.format("%Y-%m-%d").to_string(),
            water_level: r.water_level,
            capacity: r.capacity,
            current: r.current_volume,
            inflow: r.inflow,
            outflow: r.outflow,
            percent: percent_full(r.current_volume, r.capacity),
            status: r.status,
            created_by: r.created_by,
            group_id: r.group_id,
        }
    }
}

/// Percent-full is never stored. A zero-capacity row reads as 0 instead of
/// propagating a division artifact to the client.
pub fn percent_full(current: f64, capacity: f64) -> f64 {
    if capacity == 0.0 {
        0.0
    } else {
        current / capacity * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> WaterReport {
        WaterReport {
            id: 1,
            station_name: "กิ่วลม".into(),
            tambon: "-".into(),
            amphoe: "-".into(),
            province: "ลำปาง".into(),
            report_date: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            water_level: 12.5,
            capacity: 100.0,
            current_volume: 25.0,
            inflow: 0.0,
            outflow: 0.0,
            status: "pending".into(),
            created_by: Some("u1".into()),
            group_id: "group-large".into(),
        }
    }

    #[test]
    fn view_maps_storage_names_to_client_names() {
        let view = WaterReportView::from(report());
        assert_eq!(view.date, "2024-01-07");
        assert_eq!(view.current, 25.0);
        assert_eq!(view.percent, 25.0);

        let v = serde_json::to_value(&view).unwrap();
        assert_eq!(v["stationName"], "กิ่วลม");
        assert_eq!(v["groupId"], "group-large");
        assert_eq!(v["createdBy"], "u1");
        assert!(v.get("station_name").is_none());
    }

    #[test]
    fn percent_handles_zero_capacity() {
        assert_eq!(percent_full(25.0, 0.0), 0.0);
        assert_eq!(percent_full(0.0, 80.0), 0.0);
        assert_eq!(percent_full(40.0, 80.0), 50.0);
    }

    #[test]
    fn single_digit_dates_are_zero_padded() {
        let mut r = report();
        r.report_date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(WaterReportView::from(r).date, "2024-03-04");
    }
}
