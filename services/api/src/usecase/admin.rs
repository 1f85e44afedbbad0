use chrono::Utc;
use ratehub_domain::{PageRequest, Role};
use uuid::Uuid;

use crate::domain::repository::{RatingRepository, StoreRepository, UserRepository};
use crate::domain::types::{
    RatingAggregate, Store, StoreFilter, StoreSortBy, User, UserFilter, UserSortBy,
    validate_address, validate_email,
};
use crate::error::ApiError;
use crate::usecase::auth::new_user;

// ── Dashboard ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct DashboardCounts {
    pub users: i64,
    pub stores: i64,
    pub ratings: i64,
}

pub struct DashboardUseCase<U, S, R>
where
    U: UserRepository,
    S: StoreRepository,
    R: RatingRepository,
{
    pub users: U,
    pub stores: S,
    pub ratings: R,
}

impl<U, S, R> DashboardUseCase<U, S, R>
where
    U: UserRepository,
    S: StoreRepository,
    R: RatingRepository,
{
    pub async fn execute(&self) -> Result<DashboardCounts, ApiError> {
        Ok(DashboardCounts {
            users: self.users.count().await?,
            stores: self.stores.count().await?,
            ratings: self.ratings.count().await?,
        })
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub address: String,
    pub password: String,
    pub role: Role,
}

/// Admin-side account creation with an explicit role. The same profile and
/// password rules apply as on self-signup.
pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, ApiError> {
        if !crate::domain::types::validate_name(&input.name) {
            return Err(ApiError::InvalidName);
        }
        if !validate_email(&input.email) {
            return Err(ApiError::InvalidEmail);
        }
        if !validate_address(&input.address) {
            return Err(ApiError::InvalidAddress);
        }
        if !crate::domain::types::validate_password(&input.password) {
            return Err(ApiError::InvalidPassword);
        }
        let user = new_user(
            input.name,
            &input.email,
            input.address,
            &input.password,
            input.role,
        )?;
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

/// A listed account plus, for store owners, their store's current average.
///
/// `store_rating` is `Some(avg)` when the user owns a store (0.0 when the
/// store has no ratings yet) and `None` when the user owns none.
#[derive(Debug, Clone)]
pub struct AdminUserRow {
    pub user: User,
    pub store_rating: Option<f64>,
}

pub struct ListUsersUseCase<U, S, R>
where
    U: UserRepository,
    S: StoreRepository,
    R: RatingRepository,
{
    pub users: U,
    pub stores: S,
    pub ratings: R,
}

impl<U, S, R> ListUsersUseCase<U, S, R>
where
    U: UserRepository,
    S: StoreRepository,
    R: RatingRepository,
{
    pub async fn execute(
        &self,
        filter: &UserFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<AdminUserRow>, ApiError> {
        let users = self.users.list(filter, sort_by, page).await?;

        // Resolve each owner's store, then fetch all aggregates in one query.
        let mut stores_by_user = Vec::with_capacity(users.len());
        for user in &users {
            let store = if user.role == Role::StoreOwner {
                self.stores.find_by_owner_id(user.id).await?
            } else {
                None
            };
            stores_by_user.push(store);
        }
        let store_ids: Vec<Uuid> = stores_by_user
            .iter()
            .flatten()
            .map(|store| store.id)
            .collect();
        let aggregates = self.ratings.aggregates_for_stores(&store_ids).await?;

        let rows = users
            .into_iter()
            .zip(stores_by_user)
            .map(|(user, store)| {
                let store_rating = store.map(|store| {
                    aggregates
                        .iter()
                        .find(|(id, _)| *id == store.id)
                        .and_then(|(_, agg)| agg.average())
                        .unwrap_or(0.0)
                });
                AdminUserRow { user, store_rating }
            })
            .collect();
        Ok(rows)
    }
}

// ── CreateStore ──────────────────────────────────────────────────────────────

pub struct CreateStoreInput {
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Uuid,
}

/// Registers a store for an existing StoreOwner account.
pub struct CreateStoreUseCase<U, S>
where
    U: UserRepository,
    S: StoreRepository,
{
    pub users: U,
    pub stores: S,
}

impl<U, S> CreateStoreUseCase<U, S>
where
    U: UserRepository,
    S: StoreRepository,
{
    pub async fn execute(&self, input: CreateStoreInput) -> Result<Store, ApiError> {
        let name_len = input.name.chars().count();
        if name_len == 0 || name_len > 100 {
            return Err(ApiError::InvalidName);
        }
        if !validate_email(&input.email) {
            return Err(ApiError::InvalidEmail);
        }
        if !validate_address(&input.address) {
            return Err(ApiError::InvalidAddress);
        }

        let owner = self
            .users
            .find_by_id(input.owner_id)
            .await?
            .ok_or(ApiError::OwnerNotFound)?;
        if owner.role != Role::StoreOwner {
            return Err(ApiError::OwnerNotFound);
        }

        let now = Utc::now();
        let store = Store {
            id: Uuid::now_v7(),
            name: input.name,
            email: crate::domain::types::normalize_email(&input.email),
            address: input.address,
            owner_id: owner.id,
            created_at: now,
            updated_at: now,
        };
        // The unique index on owner_id is the real guard; a concurrent
        // second store for the same owner surfaces as OwnerHasStore here.
        self.stores.create(&store).await?;
        Ok(store)
    }
}

// ── ListStores ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StoreRow {
    pub store: Store,
    pub aggregate: RatingAggregate,
}

pub struct ListStoresUseCase<S, R>
where
    S: StoreRepository,
    R: RatingRepository,
{
    pub stores: S,
    pub ratings: R,
}

impl<S, R> ListStoresUseCase<S, R>
where
    S: StoreRepository,
    R: RatingRepository,
{
    pub async fn execute(
        &self,
        filter: &StoreFilter,
        sort_by: StoreSortBy,
        page: PageRequest,
    ) -> Result<Vec<StoreRow>, ApiError> {
        let stores = self.stores.list(filter, sort_by, page).await?;
        let store_ids: Vec<Uuid> = stores.iter().map(|s| s.id).collect();
        let aggregates = self.ratings.aggregates_for_stores(&store_ids).await?;

        let rows = stores
            .into_iter()
            .map(|store| {
                let aggregate = aggregates
                    .iter()
                    .find(|(id, _)| *id == store.id)
                    .map(|(_, agg)| *agg)
                    .unwrap_or_default();
                StoreRow { store, aggregate }
            })
            .collect();
        Ok(rows)
    }
}
