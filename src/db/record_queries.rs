use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use crate::models::{Diversification, Holding, Record, RecordStatistics};

const RECORD_COLUMNS: &str = "id, user_id, date, stocks, cryptos, liquidity,
    stocks_value, cryptos_value, stock_diversification, crypto_diversification,
    invested_amount, total_invested";

// Row shape of the records table; holdings and diversification live in JSONB.
#[derive(Debug, FromRow)]
struct RecordRow {
    id: Uuid,
    user_id: Uuid,
    date: DateTime<Utc>,
    stocks: Json<Vec<Holding>>,
    cryptos: Json<Vec<Holding>>,
    liquidity: f64,
    stocks_value: f64,
    cryptos_value: f64,
    stock_diversification: Json<Vec<Diversification>>,
    crypto_diversification: Json<Vec<Diversification>>,
    invested_amount: f64,
    total_invested: f64,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Record {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            stocks: row.stocks.0,
            cryptos: row.cryptos.0,
            liquidity: row.liquidity,
            statistics: RecordStatistics {
                stocks_value: row.stocks_value,
                cryptos_value: row.cryptos_value,
                stock_diversification: row.stock_diversification.0,
                crypto_diversification: row.crypto_diversification.0,
                invested_amount: row.invested_amount,
                total_invested: row.total_invested,
            },
        }
    }
}

pub async fn insert(pool: &PgPool, record: &Record) -> Result<Record, sqlx::Error> {
    let sql = format!(
        "INSERT INTO records
         (id, user_id, date, stocks, cryptos, liquidity,
          stocks_value, cryptos_value, stock_diversification, crypto_diversification,
          invested_amount, total_invested)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING {}",
        RECORD_COLUMNS
    );
    let stats = &record.statistics;
    let row = sqlx::query_as::<_, RecordRow>(&sql)
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.date)
        .bind(Json(&record.stocks))
        .bind(Json(&record.cryptos))
        .bind(record.liquidity)
        .bind(stats.stocks_value)
        .bind(stats.cryptos_value)
        .bind(Json(&stats.stock_diversification))
        .bind(Json(&stats.crypto_diversification))
        .bind(stats.invested_amount)
        .bind(stats.total_invested)
        .fetch_one(pool)
        .await?;
    Ok(row.into())
}

pub async fn fetch_one(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Option<Record>, sqlx::Error> {
    let sql = format!("SELECT {} FROM records WHERE id = $1 AND user_id = $2", RECORD_COLUMNS);
    let row = sqlx::query_as::<_, RecordRow>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Record::from))
}

pub async fn fetch_page(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Record>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM records
         WHERE user_id = $1
         ORDER BY date DESC, created_at DESC
         LIMIT $2 OFFSET $3",
        RECORD_COLUMNS
    );
    let rows = sqlx::query_as::<_, RecordRow>(&sql)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Record::from).collect())
}

pub async fn count_for_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Overwrites inputs and derived fields of the record matching `(id, user_id)`.
pub async fn update(pool: &PgPool, record: &Record) -> Result<Option<Record>, sqlx::Error> {
    let sql = format!(
        "UPDATE records
         SET date = $3, stocks = $4, cryptos = $5, liquidity = $6,
             stocks_value = $7, cryptos_value = $8,
             stock_diversification = $9, crypto_diversification = $10,
             invested_amount = $11, total_invested = $12
         WHERE id = $1 AND user_id = $2
         RETURNING {}",
        RECORD_COLUMNS
    );
    let stats = &record.statistics;
    let row = sqlx::query_as::<_, RecordRow>(&sql)
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.date)
        .bind(Json(&record.stocks))
        .bind(Json(&record.cryptos))
        .bind(record.liquidity)
        .bind(stats.stocks_value)
        .bind(stats.cryptos_value)
        .bind(Json(&stats.stock_diversification))
        .bind(Json(&stats.crypto_diversification))
        .bind(stats.invested_amount)
        .bind(stats.total_invested)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Record::from))
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM records WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
