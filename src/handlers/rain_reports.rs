use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{DEFAULT_PLACE, DEFAULT_PROVINCE};
use crate::database::models::rain_report::{RainReport, RainReportView};
use crate::error::ApiError;
use crate::AppState;

const DEFAULT_GROUP: &str = "group-medium";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRainReport {
    pub station_name: String,
    pub date: NaiveDate,
    pub rain_amount: Option<f64>,
    pub tambon: Option<String>,
    pub amphoe: Option<String>,
    pub province: Option<String>,
    pub group_id: Option<String>,
    pub created_by: Option<String>,
}

/// Updates touch only the measured amount and the lifecycle tag; station and
/// location are fixed at creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRainReport {
    pub rain_amount: Option<f64>,
    pub status: String,
}

/// GET /api/rain-reports - newest observation date first, ties broken by
/// submission time.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RainReportView>>, ApiError> {
    let rows: Vec<RainReport> =
        sqlx::query_as("SELECT * FROM rain_reports ORDER BY date DESC, created_at DESC")
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /api/rain-reports
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateRainReport>,
) -> Result<Json<Value>, ApiError> {
    let result = sqlx::query(
        "INSERT INTO rain_reports \
         (station_name, date, rain_amount, tambon, amphoe, province, group_id, status, created_by) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 'pending', ?)",
    )
    .bind(&payload.station_name)
    .bind(payload.date)
    .bind(payload.rain_amount.unwrap_or(0.0))
    .bind(payload.tambon.as_deref().unwrap_or(DEFAULT_PLACE))
    .bind(payload.amphoe.as_deref().unwrap_or(DEFAULT_PLACE))
    .bind(payload.province.as_deref().unwrap_or(DEFAULT_PROVINCE))
    .bind(payload.group_id.as_deref().unwrap_or(DEFAULT_GROUP))
    .bind(payload.created_by.as_deref())
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({ "success": true, "id": result.last_insert_id() })))
}

/// PUT /api/rain-reports/:id - an omitted amount overwrites to 0, matching
/// the full-row semantics of the other report types.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRainReport>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("UPDATE rain_reports SET rain_amount=?, status=? WHERE id=?")
        .bind(payload.rain_amount.unwrap_or(0.0))
        .bind(&payload.status)
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/rain-reports/:id - idempotent.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM rain_reports WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "success": true })))
}
