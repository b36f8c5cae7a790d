use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{DEFAULT_PLACE, DEFAULT_PROVINCE};
use crate::database::models::water_report::{WaterReport, WaterReportView};
use crate::error::ApiError;
use crate::AppState;

const DEFAULT_GROUP: &str = "group-large";
const DEFAULT_CAPACITY: f64 = 100.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWaterReport {
    pub station_name: String,
    pub date: NaiveDate,
    pub tambon: Option<String>,
    pub amphoe: Option<String>,
    pub province: Option<String>,
    pub water_level: Option<f64>,
    pub capacity: Option<f64>,
    pub inflow: Option<f64>,
    pub outflow: Option<f64>,
    pub created_by: Option<String>,
    pub group_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWaterReport {
    pub station_name: String,
    pub tambon: Option<String>,
    pub amphoe: Option<String>,
    pub province: Option<String>,
    pub water_level: Option<f64>,
    pub inflow: Option<f64>,
    pub outflow: Option<f64>,
    pub status: String,
}

/// GET /api/reports - all rows, grouped for display then newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<WaterReportView>>, ApiError> {
    let rows: Vec<WaterReport> =
        sqlx::query_as("SELECT * FROM water_reports ORDER BY group_id ASC, report_date DESC")
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /api/reports
///
/// Body keys are scrubbed before the typed decode: one of the field clients
/// pads keys with zero-width characters. Values are left alone.
pub async fn create(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let payload: CreateWaterReport = from_sanitized(raw)?;

    // current_volume is derived from the submitted level, not stored by the
    // client and not recomputed on read.
    let water_level = payload.water_level.unwrap_or(0.0);

    let result = sqlx::query(
        "INSERT INTO water_reports \
         (station_name, tambon, amphoe, province, report_date, water_level, capacity, \
          current_volume, inflow, outflow, status, created_by, group_id) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?)",
    )
    .bind(&payload.station_name)
    .bind(payload.tambon.as_deref().unwrap_or(DEFAULT_PLACE))
    .bind(payload.amphoe.as_deref().unwrap_or(DEFAULT_PLACE))
    .bind(payload.province.as_deref().unwrap_or(DEFAULT_PROVINCE))
    .bind(payload.date)
    .bind(water_level)
    .bind(payload.capacity.unwrap_or(DEFAULT_CAPACITY))
    .bind(water_level)
    .bind(payload.inflow.unwrap_or(0.0))
    .bind(payload.outflow.unwrap_or(0.0))
    .bind(payload.created_by.as_deref())
    .bind(payload.group_id.as_deref().unwrap_or(DEFAULT_GROUP))
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({ "success": true, "id": result.last_insert_id() })))
}

/// PUT /api/reports/:id - full-row overwrite. Unsupplied optionals are bound
/// to their defaults, never preserved from the stored row.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateWaterReport>,
) -> Result<Json<Value>, ApiError> {
    let water_level = payload.water_level.unwrap_or(0.0);

    sqlx::query(
        "UPDATE water_reports \
         SET station_name=?, tambon=?, amphoe=?, province=?, water_level=?, current_volume=?, \
             inflow=?, outflow=?, status=? \
         WHERE id=?",
    )
    .bind(&payload.station_name)
    .bind(payload.tambon.as_deref().unwrap_or(DEFAULT_PLACE))
    .bind(payload.amphoe.as_deref().unwrap_or(DEFAULT_PLACE))
    .bind(payload.province.as_deref().unwrap_or(DEFAULT_PROVINCE))
    .bind(water_level)
    .bind(water_level)
    .bind(payload.inflow.unwrap_or(0.0))
    .bind(payload.outflow.unwrap_or(0.0))
    .bind(&payload.status)
    .bind(id)
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/reports/:id - idempotent; a missing id still reports success.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM water_reports WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// Trim each top-level key and strip characters outside printable ASCII,
/// then run the typed decode. Keys only - station names and locations are
/// Thai text and must pass through untouched.
fn from_sanitized<T: serde::de::DeserializeOwned>(raw: Value) -> Result<T, ApiError> {
    let cleaned = match raw {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                let key: String = key.trim().chars().filter(|c| (' '..='~').contains(c)).collect();
                out.insert(key, value);
            }
            Value::Object(out)
        }
        other => other,
    };

    serde_json::from_value(cleaned).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizer_strips_zero_width_key_padding() {
        let raw = json!({
            "stationName\u{200b}": "กิ่วลม",
            " date ": "2024-01-07",
            "waterLevel": 12.5
        });

        let payload: CreateWaterReport = from_sanitized(raw).unwrap();
        assert_eq!(payload.station_name, "กิ่วลม");
        assert_eq!(payload.date, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(payload.water_level, Some(12.5));
    }

    #[test]
    fn sanitizer_leaves_values_alone() {
        let raw = json!({
            "stationName": "อ่าง\u{200b}เก็บน้ำ",
            "date": "2024-01-07"
        });

        let payload: CreateWaterReport = from_sanitized(raw).unwrap();
        assert_eq!(payload.station_name, "อ่าง\u{200b}เก็บน้ำ");
    }

    #[test]
    fn type_invalid_level_is_rejected_not_zeroed() {
        let raw = json!({
            "stationName": "S1",
            "date": "2024-01-07",
            "waterLevel": "twelve"
        });

        assert!(matches!(
            from_sanitized::<CreateWaterReport>(raw),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn create_requires_station_and_date() {
        assert!(from_sanitized::<CreateWaterReport>(json!({ "date": "2024-01-07" })).is_err());
        assert!(from_sanitized::<CreateWaterReport>(json!({ "stationName": "S1" })).is_err());
        assert!(
            from_sanitized::<CreateWaterReport>(json!({ "stationName": "S1", "date": "bad" }))
                .is_err()
        );
    }

    #[test]
    fn update_requires_status() {
        let r = serde_json::from_value::<UpdateWaterReport>(json!({
            "stationName": "S1"
        }));
        assert!(r.is_err());

        let r: UpdateWaterReport = serde_json::from_value(json!({
            "stationName": "S1",
            "status": "approved"
        }))
        .unwrap();
        assert_eq!(r.water_level, None);
    }
}
