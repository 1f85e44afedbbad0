use uuid::Uuid;

use crate::domain::repository::{RatingRepository, StoreRepository, UserRepository};
use crate::domain::types::{Rating, RatingAggregate, Store, User};
use crate::error::ApiError;

/// The owner's store with its current aggregate and everyone who rated it,
/// newest submission first.
#[derive(Debug, Clone)]
pub struct OwnerDashboard {
    pub store: Store,
    pub aggregate: RatingAggregate,
    pub raters: Vec<(User, Rating)>,
}

pub struct OwnerDashboardUseCase<U, S, R>
where
    U: UserRepository,
    S: StoreRepository,
    R: RatingRepository,
{
    pub users: U,
    pub stores: S,
    pub ratings: R,
}

impl<U, S, R> OwnerDashboardUseCase<U, S, R>
where
    U: UserRepository,
    S: StoreRepository,
    R: RatingRepository,
{
    pub async fn execute(&self, owner_id: Uuid) -> Result<OwnerDashboard, ApiError> {
        let store = self
            .stores
            .find_by_owner_id(owner_id)
            .await?
            .ok_or(ApiError::StoreNotFound)?;

        let aggregate = self.ratings.aggregate_for_store(store.id).await?;
        let ratings = self.ratings.list_for_store(store.id).await?;

        let user_ids: Vec<Uuid> = ratings.iter().map(|r| r.user_id).collect();
        let users = self.users.find_by_ids(&user_ids).await?;

        // Keep the repository's newest-first ordering; a rater whose account
        // was deleted mid-request simply drops out of the list.
        let raters = ratings
            .into_iter()
            .filter_map(|rating| {
                users
                    .iter()
                    .find(|u| u.id == rating.user_id)
                    .cloned()
                    .map(|user| (user, rating))
            })
            .collect();

        Ok(OwnerDashboard {
            store,
            aggregate,
            raters,
        })
    }
}
