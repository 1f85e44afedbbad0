use chrono::Utc;
use ratehub_domain::PageRequest;
use uuid::Uuid;

use crate::domain::repository::{RatingRepository, StoreRepository};
use crate::domain::types::{
    Rating, RatingAggregate, RatingUpsert, Store, StoreFilter, StoreSortBy, validate_rating,
};
use crate::error::ApiError;

// ── BrowseStores ─────────────────────────────────────────────────────────────

/// A store as seen by a normal user: the overall average plus the caller's
/// own rating when one exists.
#[derive(Debug, Clone)]
pub struct BrowseStoreRow {
    pub store: Store,
    pub aggregate: RatingAggregate,
    pub my_rating: Option<Rating>,
}

pub struct BrowseStoresUseCase<S, R>
where
    S: StoreRepository,
    R: RatingRepository,
{
    pub stores: S,
    pub ratings: R,
}

impl<S, R> BrowseStoresUseCase<S, R>
where
    S: StoreRepository,
    R: RatingRepository,
{
    pub async fn execute(
        &self,
        caller_id: Uuid,
        filter: &StoreFilter,
        sort_by: StoreSortBy,
        page: PageRequest,
    ) -> Result<Vec<BrowseStoreRow>, ApiError> {
        let stores = self.stores.list(filter, sort_by, page).await?;
        let store_ids: Vec<Uuid> = stores.iter().map(|s| s.id).collect();

        let aggregates = self.ratings.aggregates_for_stores(&store_ids).await?;
        let mine = self.ratings.list_for_user(caller_id).await?;

        let rows = stores
            .into_iter()
            .map(|store| {
                let aggregate = aggregates
                    .iter()
                    .find(|(id, _)| *id == store.id)
                    .map(|(_, agg)| *agg)
                    .unwrap_or_default();
                let my_rating = mine.iter().find(|r| r.store_id == store.id).cloned();
                BrowseStoreRow {
                    store,
                    aggregate,
                    my_rating,
                }
            })
            .collect();
        Ok(rows)
    }
}

// ── RateStore ────────────────────────────────────────────────────────────────

/// Submits or replaces the caller's rating of a store. Whether the call
/// created a new rating or modified the old one is reported back so the
/// handler can pick the status code.
pub struct RateStoreUseCase<S, R>
where
    S: StoreRepository,
    R: RatingRepository,
{
    pub stores: S,
    pub ratings: R,
}

impl<S, R> RateStoreUseCase<S, R>
where
    S: StoreRepository,
    R: RatingRepository,
{
    pub async fn execute(
        &self,
        caller_id: Uuid,
        store_id: Uuid,
        value: i16,
    ) -> Result<RatingUpsert, ApiError> {
        if !validate_rating(value) {
            return Err(ApiError::InvalidRating);
        }
        if self.stores.find_by_id(store_id).await?.is_none() {
            return Err(ApiError::StoreNotFound);
        }
        let now = Utc::now();
        let rating = Rating {
            id: Uuid::now_v7(),
            user_id: caller_id,
            store_id,
            value,
            created_at: now,
            updated_at: now,
        };
        self.ratings.upsert(&rating).await
    }
}
