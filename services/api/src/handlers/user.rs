use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use ratehub_domain::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{RatingOutcome, StoreFilter, StoreSortBy};
use crate::error::ApiError;
use crate::handlers::{listing_page_request, parse_sort, rounded_average};
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::user::{BrowseStoresUseCase, RateStoreUseCase};

// ── GET /api/user/stores ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BrowseStoresQuery {
    pub search: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Serialize)]
pub struct MyRatingResponse {
    pub id: String,
    pub value: i16,
}

#[derive(Serialize)]
pub struct BrowseStoreResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub average_rating: f64,
    pub rating_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_rating: Option<MyRatingResponse>,
}

pub async fn browse_stores(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<BrowseStoresQuery>,
) -> Result<Json<Vec<BrowseStoreResponse>>, ApiError> {
    identity.require(&[Role::NormalUser])?;

    let filter = StoreFilter {
        search: query.search,
        name: query.name,
        email: query.email,
        address: query.address,
    };
    let sort = parse_sort(query.order.as_deref())?;
    let sort_by = match query.sort_by.as_deref() {
        Some(field) => StoreSortBy::from_query(field, sort).ok_or(ApiError::InvalidQuery)?,
        None => StoreSortBy::default(),
    };

    let usecase = BrowseStoresUseCase {
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let rows = usecase
        .execute(
            identity.user_id,
            &filter,
            sort_by,
            listing_page_request(query.per_page, query.page),
        )
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| BrowseStoreResponse {
                id: row.store.id.to_string(),
                name: row.store.name,
                address: row.store.address,
                average_rating: rounded_average(row.aggregate.average()),
                rating_count: row.aggregate.count,
                my_rating: row.my_rating.map(|r| MyRatingResponse {
                    id: r.id.to_string(),
                    value: r.value,
                }),
            })
            .collect(),
    ))
}

// ── POST /api/user/ratings ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RateStoreRequest {
    pub store_id: Uuid,
    pub value: i16,
}

#[derive(Serialize)]
pub struct RateStoreResponse {
    pub id: String,
    pub store_id: String,
    pub value: i16,
}

pub async fn rate_store(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<RateStoreRequest>,
) -> Result<(StatusCode, Json<RateStoreResponse>), ApiError> {
    identity.require(&[Role::NormalUser])?;
    let usecase = RateStoreUseCase {
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let upsert = usecase
        .execute(identity.user_id, body.store_id, body.value)
        .await?;

    let status = match upsert.outcome {
        RatingOutcome::Created => StatusCode::CREATED,
        RatingOutcome::Modified => StatusCode::OK,
    };
    Ok((
        status,
        Json(RateStoreResponse {
            id: upsert.rating_id.to_string(),
            store_id: body.store_id.to_string(),
            value: body.value,
        }),
    ))
}
