use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlSslMode};
use sqlx::MySqlPool;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

pub mod models;

/// Build the process-wide pool without touching the network. Connections are
/// established on first use, so the service comes up even when the store is
/// down and requests fail individually until it recovers.
pub fn connect(config: &DatabaseConfig) -> MySqlPool {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
        .ssl_mode(parse_ssl_mode(&config.ssl_mode));

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy_with(options)
}

/// Unknown modes fall back to the strict default rather than silently
/// weakening transport security.
fn parse_ssl_mode(value: &str) -> MySqlSslMode {
    match value.to_ascii_lowercase().as_str() {
        "disabled" => MySqlSslMode::Disabled,
        "preferred" => MySqlSslMode::Preferred,
        "required" => MySqlSslMode::Required,
        "verify_ca" => MySqlSslMode::VerifyCa,
        "verify_identity" => MySqlSslMode::VerifyIdentity,
        other => {
            warn!("unknown DB_SSL_MODE {other:?}, keeping verify_identity");
            MySqlSslMode::VerifyIdentity
        }
    }
}

/// Run embedded migrations, then first-run seeding.
pub async fn prepare(pool: &MySqlPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    seed_admin(pool).await
}

/// With hashed credentials a fresh database has no usable login, so an admin
/// row is inserted on first run - only when the users table is empty and
/// ADMIN_PASSWORD is set.
async fn seed_admin(pool: &MySqlPool) -> anyhow::Result<()> {
    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(v) if !v.is_empty() => v,
        _ => return Ok(()),
    };
    let username = std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let hash = crate::auth::hash_password(&password)?;
    sqlx::query(
        "INSERT INTO users (username, password_hash, role, full_name, organization) \
         VALUES (?, ?, 'admin', ?, ?)",
    )
    .bind(&username)
    .bind(&hash)
    .bind("Administrator")
    .bind("-")
    .execute(pool)
    .await?;

    info!("seeded initial admin user {username}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssl_mode_parses_known_values() {
        assert!(matches!(parse_ssl_mode("disabled"), MySqlSslMode::Disabled));
        assert!(matches!(parse_ssl_mode("Preferred"), MySqlSslMode::Preferred));
        assert!(matches!(parse_ssl_mode("required"), MySqlSslMode::Required));
        assert!(matches!(parse_ssl_mode("verify_ca"), MySqlSslMode::VerifyCa));
        assert!(matches!(
            parse_ssl_mode("verify_identity"),
            MySqlSslMode::VerifyIdentity
        ));
    }

    #[test]
    fn ssl_mode_junk_stays_strict() {
        assert!(matches!(
            parse_ssl_mode("rejectUnauthorized=false"),
            MySqlSslMode::VerifyIdentity
        ));
    }
}
