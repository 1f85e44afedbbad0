use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Transaction, round2};
use crate::error::ApiError;
use crate::handlers::page_request;
use crate::state::AppState;
use crate::usecase::transaction::{ListTransactionsUseCase, TransactionStatsUseCase};

#[derive(Serialize)]
pub struct TransactionResponse {
    pub id: i32,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub sold: bool,
    #[serde(serialize_with = "ratehub_core::serde::to_rfc3339_ms")]
    pub date_of_sale: chrono::DateTime<chrono::Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            title: t.title,
            price: t.price,
            description: t.description,
            category: t.category,
            image: t.image,
            sold: t.sold,
            date_of_sale: t.date_of_sale,
        }
    }
}

// ── GET /api/transactions ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListTransactionsQuery {
    pub month: Option<String>,
    pub search: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Serialize)]
pub struct TransactionPageResponse {
    pub records: Vec<TransactionResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<TransactionPageResponse>, ApiError> {
    let page = page_request(query.per_page, query.page);
    let usecase = ListTransactionsUseCase {
        repo: state.transaction_repo(),
    };
    let result = usecase
        .execute(query.month.as_deref(), query.search.as_deref(), page)
        .await?;

    Ok(Json(TransactionPageResponse {
        records: result
            .records
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
        total: result.total,
        page: page.page,
        per_page: page.per_page,
    }))
}

// ── GET /api/transactions/statistics ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct StatisticsQuery {
    pub month: String,
}

#[derive(Serialize)]
pub struct StatisticsResponse {
    pub total_sale_amount: f64,
    pub sold_count: i64,
    pub unsold_count: i64,
}

pub async fn statistics(
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let usecase = TransactionStatsUseCase {
        repo: state.transaction_repo(),
    };
    let stats = usecase.execute(&query.month).await?;
    Ok(Json(StatisticsResponse {
        total_sale_amount: round2(stats.total_sale_amount),
        sold_count: stats.sold_count,
        unsold_count: stats.unsold_count,
    }))
}
