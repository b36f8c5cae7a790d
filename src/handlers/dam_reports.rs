use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::dam_report::{DamReport, DamReportView};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDamReport {
    pub station_name: String,
    pub date: NaiveDate,
    pub current_storage: Option<f64>,
    pub usable_storage: Option<f64>,
    pub capacity: Option<f64>,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDamReport {
    pub current_storage: Option<f64>,
    pub usable_storage: Option<f64>,
    pub capacity: Option<f64>,
    pub status: String,
}

/// GET /api/dam-reports - newest date first, ties broken by id.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<DamReportView>>, ApiError> {
    let rows: Vec<DamReport> =
        sqlx::query_as("SELECT * FROM dam_reports ORDER BY date DESC, id DESC")
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /api/dam-reports - created_at is stamped by the store.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateDamReport>,
) -> Result<Json<Value>, ApiError> {
    let result = sqlx::query(
        "INSERT INTO dam_reports \
         (station_name, date, current_storage, usable_storage, capacity, status, created_by) \
         VALUES (?, ?, ?, ?, ?, 'pending', ?)",
    )
    .bind(&payload.station_name)
    .bind(payload.date)
    .bind(payload.current_storage.unwrap_or(0.0))
    .bind(payload.usable_storage.unwrap_or(0.0))
    .bind(payload.capacity.unwrap_or(0.0))
    .bind(payload.created_by.as_deref())
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({ "success": true, "id": result.last_insert_id() })))
}

/// PUT /api/dam-reports/:id - full overwrite of the storage figures and the
/// lifecycle tag; omitted numbers overwrite to 0.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateDamReport>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query(
        "UPDATE dam_reports SET current_storage=?, usable_storage=?, capacity=?, status=? \
         WHERE id=?",
    )
    .bind(payload.current_storage.unwrap_or(0.0))
    .bind(payload.usable_storage.unwrap_or(0.0))
    .bind(payload.capacity.unwrap_or(0.0))
    .bind(&payload.status)
    .bind(id)
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/dam-reports/:id - idempotent.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM dam_reports WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "success": true })))
}
