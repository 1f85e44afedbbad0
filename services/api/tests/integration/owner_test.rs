use chrono::{Duration, Utc};
use ratehub_api::error::ApiError;
use ratehub_api::usecase::owner::OwnerDashboardUseCase;
use ratehub_domain::Role;
use uuid::Uuid;

use crate::helpers::{MockRatingRepo, MockStoreRepo, MockUserRepo, test_store, test_user};

#[tokio::test]
async fn owner_without_store_gets_store_not_found() {
    let usecase = OwnerDashboardUseCase {
        users: MockUserRepo::empty(),
        stores: MockStoreRepo::empty(),
        ratings: MockRatingRepo::empty(),
    };
    assert!(matches!(
        usecase.execute(Uuid::now_v7()).await,
        Err(ApiError::StoreNotFound)
    ));
}

#[tokio::test]
async fn dashboard_collects_raters_newest_first() {
    let owner = test_user(Role::StoreOwner);
    let store = test_store(owner.id);

    let first_rater = test_user(Role::NormalUser);
    let second_rater = test_user(Role::NormalUser);
    let now = Utc::now();

    let mut old_rating = crate::helpers::test_rating(first_rater.id, store.id, 2);
    old_rating.created_at = now - Duration::days(1);
    let mut new_rating = crate::helpers::test_rating(second_rater.id, store.id, 5);
    new_rating.created_at = now;

    let usecase = OwnerDashboardUseCase {
        users: MockUserRepo::new(vec![
            owner.clone(),
            first_rater.clone(),
            second_rater.clone(),
        ]),
        stores: MockStoreRepo::new(vec![store.clone()]),
        ratings: MockRatingRepo::new(vec![old_rating, new_rating]),
    };

    let dashboard = usecase.execute(owner.id).await.unwrap();
    assert_eq!(dashboard.store.id, store.id);
    assert_eq!(dashboard.aggregate.average(), Some(3.5));
    assert_eq!(dashboard.aggregate.count, 2);

    let rater_ids: Vec<Uuid> = dashboard.raters.iter().map(|(u, _)| u.id).collect();
    assert_eq!(rater_ids, vec![second_rater.id, first_rater.id]);
}

#[tokio::test]
async fn dashboard_with_no_ratings_reports_empty_aggregate() {
    let owner = test_user(Role::StoreOwner);
    let store = test_store(owner.id);
    let usecase = OwnerDashboardUseCase {
        users: MockUserRepo::new(vec![owner.clone()]),
        stores: MockStoreRepo::new(vec![store]),
        ratings: MockRatingRepo::empty(),
    };
    let dashboard = usecase.execute(owner.id).await.unwrap();
    assert_eq!(dashboard.aggregate.count, 0);
    assert_eq!(dashboard.aggregate.average(), None);
    assert!(dashboard.raters.is_empty());
}
