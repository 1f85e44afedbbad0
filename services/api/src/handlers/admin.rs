use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use ratehub_domain::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{StoreFilter, StoreSortBy, UserFilter, UserSortBy, round2};
use crate::error::ApiError;
use crate::handlers::{UserResponse, listing_page_request, parse_sort, rounded_average};
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::admin::{
    CreateStoreInput, CreateStoreUseCase, CreateUserInput, CreateUserUseCase, DashboardUseCase,
    ListStoresUseCase, ListUsersUseCase, StoreRow,
};

// ── GET /api/admin/dashboard ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardResponse {
    pub total_users: i64,
    pub total_stores: i64,
    pub total_ratings: i64,
}

pub async fn dashboard(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    identity.require(&[Role::Admin])?;
    let usecase = DashboardUseCase {
        users: state.user_repo(),
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let counts = usecase.execute().await?;
    Ok(Json(DashboardResponse {
        total_users: counts.users,
        total_stores: counts.stores,
        total_ratings: counts.ratings,
    }))
}

// ── POST /api/admin/users ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    pub password: String,
    pub role: String,
}

pub async fn create_user(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    identity.require(&[Role::Admin])?;
    let role = Role::from_str_name(&body.role).ok_or(ApiError::InvalidRole)?;
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(CreateUserInput {
            name: body.name,
            email: body.email,
            address: body.address,
            password: body.password,
            role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/admin/users ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Serialize)]
pub struct AdminUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Average rating of the user's store; only present for store owners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_rating: Option<f64>,
}

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<AdminUserResponse>>, ApiError> {
    identity.require(&[Role::Admin])?;

    let role = match query.role.as_deref() {
        Some(raw) => Some(Role::from_str_name(raw).ok_or(ApiError::InvalidRole)?),
        None => None,
    };
    let filter = UserFilter {
        search: query.search,
        name: query.name,
        email: query.email,
        address: query.address,
        role,
    };
    let sort = parse_sort(query.order.as_deref())?;
    let sort_by = match query.sort_by.as_deref() {
        Some(field) => UserSortBy::from_query(field, sort).ok_or(ApiError::InvalidQuery)?,
        None => UserSortBy::default(),
    };

    let usecase = ListUsersUseCase {
        users: state.user_repo(),
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let rows = usecase
        .execute(&filter, sort_by, listing_page_request(query.per_page, query.page))
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| AdminUserResponse {
                user: row.user.into(),
                store_rating: row.store_rating.map(round2),
            })
            .collect(),
    ))
}

// ── POST /api/admin/stores ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Uuid,
}

#[derive(Serialize)]
pub struct StoreResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: String,
    pub average_rating: f64,
    pub rating_count: i64,
}

impl From<StoreRow> for StoreResponse {
    fn from(row: StoreRow) -> Self {
        Self {
            id: row.store.id.to_string(),
            name: row.store.name,
            email: row.store.email,
            address: row.store.address,
            owner_id: row.store.owner_id.to_string(),
            average_rating: rounded_average(row.aggregate.average()),
            rating_count: row.aggregate.count,
        }
    }
}

pub async fn create_store(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<StoreResponse>), ApiError> {
    identity.require(&[Role::Admin])?;
    let usecase = CreateStoreUseCase {
        users: state.user_repo(),
        stores: state.store_repo(),
    };
    let store = usecase
        .execute(CreateStoreInput {
            name: body.name,
            email: body.email,
            address: body.address,
            owner_id: body.owner_id,
        })
        .await?;
    let response = StoreResponse {
        id: store.id.to_string(),
        name: store.name,
        email: store.email,
        address: store.address,
        owner_id: store.owner_id.to_string(),
        average_rating: 0.0,
        rating_count: 0,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

// ── GET /api/admin/stores ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListStoresQuery {
    pub search: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_stores(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ListStoresQuery>,
) -> Result<Json<Vec<StoreResponse>>, ApiError> {
    identity.require(&[Role::Admin])?;

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

    let usecase = ListStoresUseCase {
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let rows = usecase
        .execute(&filter, sort_by, listing_page_request(query.per_page, query.page))
        .await?;

    Ok(Json(rows.into_iter().map(StoreResponse::from).collect()))
}
