#![allow(async_fn_in_trait)]

use uuid::Uuid;

use ratehub_domain::PageRequest;

use crate::domain::types::{
    Rating, RatingAggregate, RatingUpsert, Store, StoreFilter, StoreSortBy, Transaction,
    TransactionStats, User, UserFilter, UserSortBy,
};
use crate::error::ApiError;

/// Repository for platform accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;

    /// Lookup by normalized (lowercased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, ApiError>;

    /// Insert a new account. A duplicate email maps to [`ApiError::EmailTaken`].
    async fn create(&self, user: &User) -> Result<(), ApiError>;

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError>;

    async fn list(
        &self,
        filter: &UserFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiError>;

    async fn count(&self) -> Result<i64, ApiError>;
}

/// Repository for stores.
pub trait StoreRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, ApiError>;

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Option<Store>, ApiError>;

    /// Insert a new store. Duplicate email maps to [`ApiError::EmailTaken`];
    /// a second store for the same owner maps to [`ApiError::OwnerHasStore`].
    async fn create(&self, store: &Store) -> Result<(), ApiError>;

    async fn list(
        &self,
        filter: &StoreFilter,
        sort_by: StoreSortBy,
        page: PageRequest,
    ) -> Result<Vec<Store>, ApiError>;

    async fn count(&self) -> Result<i64, ApiError>;
}

/// Repository for store ratings.
pub trait RatingRepository: Send + Sync {
    /// Insert the caller's rating for a store, or replace the value of the
    /// existing one. At most one rating per (user, store) survives; a
    /// concurrent duplicate insert must resolve to a replacement, not an
    /// error or a second row.
    async fn upsert(&self, rating: &Rating) -> Result<RatingUpsert, ApiError>;

    async fn find_by_user_and_store(
        &self,
        user_id: Uuid,
        store_id: Uuid,
    ) -> Result<Option<Rating>, ApiError>;

    async fn list_for_store(&self, store_id: Uuid) -> Result<Vec<Rating>, ApiError>;

    /// All ratings one user has submitted, for projecting "my rating" onto
    /// store listings in a single query.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Rating>, ApiError>;

    /// Rating sum and count for one store. Zero counts come back as the
    /// default aggregate.
    async fn aggregate_for_store(&self, store_id: Uuid) -> Result<RatingAggregate, ApiError>;

    /// Grouped sums and counts for a batch of stores; stores without ratings
    /// are absent from the result.
    async fn aggregates_for_stores(
        &self,
        store_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, RatingAggregate)>, ApiError>;

    async fn count(&self) -> Result<i64, ApiError>;
}

/// Repository for imported sale records.
pub trait TransactionRepository: Send + Sync {
    /// Paged listing, optionally restricted to one sale month (1-12,
    /// matched across all years) and a case-insensitive search over title,
    /// description, and exact price. Returns the page plus the total count
    /// of matching rows.
    async fn list(
        &self,
        month: Option<u32>,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<(Vec<Transaction>, i64), ApiError>;

    /// Sale statistics for one month across all years.
    async fn statistics(&self, month: u32) -> Result<TransactionStats, ApiError>;

    async fn count(&self) -> Result<i64, ApiError>;

    async fn insert_many(&self, transactions: &[Transaction]) -> Result<(), ApiError>;
}
