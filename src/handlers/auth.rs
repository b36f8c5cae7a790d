use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::auth::verify_password;
use crate::database::models::user::{User, UserProfile};
use crate::error::ApiError;
use crate::AppState;

const USER_NOT_FOUND: &str = "ไม่พบชื่อผู้ใช้นี้ในระบบ";
const WRONG_PASSWORD: &str = "รหัสผ่านไม่ถูกต้อง";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login - exact-username lookup, bcrypt check, public profile out.
///
/// An unknown username deliberately reports as 401 rather than 404; the
/// dashboard shows either refusal message as-is. No token is issued - the
/// client persists the returned profile.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE username = ?")
        .bind(&payload.username)
        .fetch_optional(&state.pool)
        .await?;

    let user = user.ok_or_else(|| ApiError::Unauthorized(USER_NOT_FOUND.to_string()))?;

    if !verify_password(&payload.password, &user.password_hash) {
        tracing::info!("failed login for {}", user.username);
        return Err(ApiError::Unauthorized(WRONG_PASSWORD.to_string()));
    }

    Ok(Json(user.into()))
}
