use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;
use crate::db;
use crate::errors::AppError;
use crate::models::{Holding, Pagination, Record, RecordInput};
use crate::services::statistics;

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    input: RecordInput,
) -> Result<Record, AppError> {
    validate_input(&input)?;
    let record = Record::new(user_id, input);
    debug!(
        "Generated statistics for record {}: invested {} total {}",
        record.id, record.statistics.invested_amount, record.statistics.total_invested
    );
    let record = db::record_queries::insert(pool, &record).await?;
    info!("Created record {} for user {}", record.id, user_id);
    Ok(record)
}

pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    input: RecordInput,
) -> Result<Record, AppError> {
    validate_input(&input)?;
    let record = Record::with_id(id, user_id, input);
    found(db::record_queries::update(pool, &record).await?)
}

pub async fn fetch_one(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Record, AppError> {
    found(db::record_queries::fetch_one(pool, user_id, id).await?)
}

pub async fn fetch_page(
    pool: &PgPool,
    user_id: Uuid,
    pagination: Pagination,
) -> Result<Vec<Record>, AppError> {
    let offset = validate_pagination(&pagination)?;
    let records = db::record_queries::fetch_page(
        pool,
        user_id,
        pagination.page_size,
        offset,
    )
    .await?;
    Ok(records)
}

pub async fn count(pool: &PgPool, user_id: Uuid) -> Result<i64, AppError> {
    let count = db::record_queries::count_for_user(pool, user_id).await?;
    Ok(count)
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    deleted(db::record_queries::delete(pool, user_id, id).await?)
}

// Rows are always matched on (id, user_id), so another user's record is also "not found".
fn found(record: Option<Record>) -> Result<Record, AppError> {
    record.ok_or_else(|| AppError::NotFound("Record not found".to_string()))
}

fn deleted(rows_affected: u64) -> Result<(), AppError> {
    match rows_affected {
        0 => Err(AppError::NotFound("Record not found".to_string())),
        _ => Ok(()),
    }
}

pub fn validate_input(input: &RecordInput) -> Result<(), AppError> {
    if !input.liquidity.is_finite() || input.liquidity < 0.0 {
        return Err(AppError::Validation(
            "Liquidity must be a non-negative number".into(),
        ));
    }
    validate_holdings("stocks", &input.stocks)?;
    validate_holdings("cryptos", &input.cryptos)?;

    // Finite parts can still overflow once summed.
    let stocks_value = statistics::total_value(&input.stocks);
    let cryptos_value = statistics::total_value(&input.cryptos);
    if !stocks_value.is_finite() || !cryptos_value.is_finite() {
        return Err(AppError::Validation("Holdings total value is out of range".into()));
    }
    if !(stocks_value + cryptos_value + input.liquidity).is_finite() {
        return Err(AppError::Validation("Total net worth is out of range".into()));
    }
    Ok(())
}

fn validate_holdings(kind: &str, holdings: &[Holding]) -> Result<(), AppError> {
    for (i, holding) in holdings.iter().enumerate() {
        if holding.symbol.trim().is_empty() {
            return Err(AppError::Validation(format!("{}[{}]: symbol cannot be empty", kind, i)));
        }
        if !holding.valued_at.is_finite() || holding.valued_at < 0.0 {
            return Err(AppError::Validation(format!(
                "{}[{}] {}: valuedAt must be a non-negative number",
                kind, i, holding.symbol
            )));
        }
        if !holding.quantity.is_finite() {
            return Err(AppError::Validation(format!(
                "{}[{}] {}: quantity must be a number",
                kind, i, holding.symbol
            )));
        }
    }
    Ok(())
}

/// Checks the page bounds and returns the row offset to query from.
pub fn validate_pagination(pagination: &Pagination) -> Result<i64, AppError> {
    if pagination.page < 0 {
        return Err(AppError::Validation("page cannot be negative".into()));
    }
    if pagination.page_size < 1 || pagination.page_size > Pagination::MAX_PAGE_SIZE {
        return Err(AppError::Validation(format!(
            "pageSize must be between 1 and {}",
            Pagination::MAX_PAGE_SIZE
        )));
    }
    pagination
        .offset()
        .ok_or_else(|| AppError::Validation("page is out of range".into()))
}
