use sqlx::SqlitePool;

use crate::domain::repositories::RepositoryError;

/// Keys used in the key-value table
pub const CURRENT_GAME_KEY: &str = "currentGame";
pub const APP_SETTINGS_KEY: &str = "appSettings";

/// Raw JSON stored under `key`
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>, RepositoryError> {
    sqlx::query_scalar("SELECT value_json FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))
}

/// Store JSON under `key` (create or update)
pub async fn set_value(pool: &SqlitePool, key: &str, value_json: &str) -> Result<(), RepositoryError> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO kv_store (key, value_json, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value_json = excluded.value_json,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value_json)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| RepositoryError::Database(e.to_string()))?;

    Ok(())
}

/// Remove `key`
pub async fn remove_value(pool: &SqlitePool, key: &str) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM kv_store WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

    Ok(())
}
