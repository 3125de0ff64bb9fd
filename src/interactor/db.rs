use crate::entity::FavoriteRecord;
use chrono::Utc;
use log::info;
use sqlx::{Error as SqlxError, PgPool, Row};

// Check if a coin is in the chat's favorites
pub async fn favorite_exists(
    pool: &PgPool,
    chat_id: i64,
    coin_id: &str,
) -> Result<bool, SqlxError> {
    let row = sqlx::query(
        "SELECT COUNT(*) as count FROM favorite_coins WHERE chat_id = $1 AND coin_id = $2",
    )
    .bind(chat_id)
    .bind(coin_id)
    .fetch_one(pool)
    .await?;

    let count: i64 = row.try_get("count")?;
    Ok(count > 0)
}

// Insert a favorite record
pub async fn insert_favorite(
    pool: &PgPool,
    chat_id: i64,
    record: &FavoriteRecord,
) -> Result<i32, SqlxError> {
    let row = sqlx::query(
        "INSERT INTO favorite_coins (chat_id, coin_id, name, symbol, market_cap_rank, thumb, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(chat_id)
    .bind(&record.id)
    .bind(&record.name)
    .bind(&record.symbol)
    .bind(record.market_cap_rank)
    .bind(&record.thumb)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    let id: i32 = row.try_get("id")?;
    info!("Added favorite {} for chat {} (row {})", record.id, chat_id, id);

    Ok(id)
}

// Delete a favorite record; returns whether anything was removed
pub async fn delete_favorite(
    pool: &PgPool,
    chat_id: i64,
    coin_id: &str,
) -> Result<bool, SqlxError> {
    let result = sqlx::query("DELETE FROM favorite_coins WHERE chat_id = $1 AND coin_id = $2")
        .bind(chat_id)
        .bind(coin_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        info!("Removed favorite {} for chat {}", coin_id, chat_id);
    }

    Ok(result.rows_affected() > 0)
}

// Get all favorites of a chat, oldest first
pub async fn get_chat_favorites(
    pool: &PgPool,
    chat_id: i64,
) -> Result<Vec<FavoriteRecord>, SqlxError> {
    sqlx::query_as::<_, FavoriteRecord>(
        "SELECT coin_id, name, symbol, market_cap_rank, thumb FROM favorite_coins \
         WHERE chat_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(chat_id)
    .fetch_all(pool)
    .await
}
