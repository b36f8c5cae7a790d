use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::hash_password;
use crate::database::models::user::UserProfile;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub role: String,
    pub full_name: String,
    #[serde(default)]
    pub organization: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub username: String,
    pub role: String,
    pub full_name: String,
    #[serde(default)]
    pub organization: String,
    /// When absent or empty the stored hash is left untouched.
    pub password: Option<String>,
}

/// GET /api/users - every account, password hash omitted.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let users: Vec<UserProfile> =
        sqlx::query_as("SELECT id, username, role, full_name, organization FROM users")
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(users))
}

/// POST /api/users - username uniqueness is the store's constraint; a
/// duplicate surfaces as the usual 500, not a pre-checked 409.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<Json<Value>, ApiError> {
    let hash = hash_password(&payload.password)?;

    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, role, full_name, organization) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&payload.username)
    .bind(&hash)
    .bind(&payload.role)
    .bind(&payload.full_name)
    .bind(&payload.organization)
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({ "success": true, "id": result.last_insert_id() })))
}

/// PUT /api/users/:id - the password column travels only when a replacement
/// is supplied.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<Value>, ApiError> {
    match payload.password.as_deref().filter(|p| !p.is_empty()) {
        Some(plain) => {
            let hash = hash_password(plain)?;
            sqlx::query(
                "UPDATE users SET username=?, role=?, full_name=?, organization=?, password_hash=? \
                 WHERE id=?",
            )
            .bind(&payload.username)
            .bind(&payload.role)
            .bind(&payload.full_name)
            .bind(&payload.organization)
            .bind(&hash)
            .bind(id)
            .execute(&state.pool)
            .await?;
        }
        None => {
            sqlx::query("UPDATE users SET username=?, role=?, full_name=?, organization=? WHERE id=?")
                .bind(&payload.username)
                .bind(&payload.role)
                .bind(&payload.full_name)
                .bind(&payload.organization)
                .bind(id)
                .execute(&state.pool)
                .await?;
        }
    }

    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/users/:id - no existence check; deleting a missing id still
/// acknowledges success.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_organization_only() {
        let u: CreateUser = serde_json::from_value(json!({
            "username": "nok",
            "password": "pw",
            "role": "reporter",
            "fullName": "Nok T."
        }))
        .unwrap();
        assert_eq!(u.organization, "");

        // password is not optional on create
        assert!(serde_json::from_value::<CreateUser>(json!({
            "username": "nok",
            "role": "reporter",
            "fullName": "Nok T."
        }))
        .is_err());
    }

    #[test]
    fn update_password_is_optional() {
        let u: UpdateUser = serde_json::from_value(json!({
            "username": "nok",
            "role": "admin",
            "fullName": "Nok T."
        }))
        .unwrap();
        assert!(u.password.is_none());

        // empty string means "keep the old one" as well
        let u: UpdateUser = serde_json::from_value(json!({
            "username": "nok",
            "role": "admin",
            "fullName": "Nok T.",
            "password": ""
        }))
        .unwrap();
        assert!(u.password.as_deref().filter(|p| !p.is_empty()).is_none());
    }
}
