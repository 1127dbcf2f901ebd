use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::statistics;

// A single stock or crypto position with its valuation at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    /// Shares or coins held. Informational only, never used for valuation.
    #[serde(default, alias = "shares", alias = "coins")]
    pub quantity: f64,
    pub valued_at: f64,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, quantity: f64, valued_at: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            valued_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diversification {
    pub symbol: String,
    pub percent: f64,
}

/// Derived figures of a record. Only `services::statistics` produces these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordStatistics {
    pub stocks_value: f64,
    pub cryptos_value: f64,
    pub stock_diversification: Vec<Diversification>,
    pub crypto_diversification: Vec<Diversification>,
    pub invested_amount: f64,
    pub total_invested: f64,
}

// One dated net worth snapshot owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub stocks: Vec<Holding>,
    pub cryptos: Vec<Holding>,
    pub liquidity: f64,
    #[serde(flatten)]
    pub statistics: RecordStatistics,
}

/// Payload accepted on create and update. Derived fields sent by clients are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInput {
    pub date: DateTime<Utc>,
    pub stocks: Vec<Holding>,
    pub cryptos: Vec<Holding>,
    pub liquidity: f64,
}

impl Record {
    pub fn new(user_id: Uuid, input: RecordInput) -> Self {
        Self::with_id(Uuid::new_v4(), user_id, input)
    }

    /// Builds the record stored under an existing id, statistics included.
    pub fn with_id(id: Uuid, user_id: Uuid, input: RecordInput) -> Self {
        let mut record = Self {
            id,
            user_id,
            date: input.date,
            stocks: input.stocks,
            cryptos: input.cryptos,
            liquidity: input.liquidity,
            statistics: RecordStatistics::default(),
        };
        record.refresh_statistics();
        record
    }

    pub fn refresh_statistics(&mut self) {
        self.statistics = statistics::generate(&self.stocks, &self.cryptos, self.liquidity);
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_size() -> i64 {
    10
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: default_page_size(),
        }
    }
}

impl Pagination {
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// Row offset of the page, `None` when it does not fit in an i64.
    pub fn offset(&self) -> Option<i64> {
        self.page.checked_mul(self.page_size)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResponse {
    pub record: Record,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordListResponse {
    pub records: Vec<Record>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCountResponse {
    pub record_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
