use ratehub_api::domain::repository::RatingRepository as _;
use ratehub_api::domain::types::{RatingOutcome, StoreFilter, StoreSortBy, round2};
use ratehub_api::error::ApiError;
use ratehub_api::handlers::listing_page_request;
use ratehub_api::usecase::user::{BrowseStoresUseCase, RateStoreUseCase};
use ratehub_domain::{PageRequest, Role};
use uuid::Uuid;

use crate::helpers::{MockRatingRepo, MockStoreRepo, test_rating, test_store, test_user};

#[tokio::test]
async fn one_rating_per_user_and_store_survives_resubmission() {
    let store = test_store(Uuid::now_v7());
    let stores = MockStoreRepo::new(vec![store.clone()]);
    let ratings = MockRatingRepo::empty();
    let usecase = RateStoreUseCase {
        stores,
        ratings: ratings.clone(),
    };
    let rater = test_user(Role::NormalUser);

    let first = usecase.execute(rater.id, store.id, 5).await.unwrap();
    assert_eq!(first.outcome, RatingOutcome::Created);

    let second = usecase.execute(rater.id, store.id, 1).await.unwrap();
    assert_eq!(second.outcome, RatingOutcome::Modified);
    assert_eq!(second.rating_id, first.rating_id);

    assert_eq!(ratings.count().await.unwrap(), 1);
    let stored = ratings
        .find_by_user_and_store(rater.id, store.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.value, 1);
}

#[tokio::test]
async fn different_users_rate_the_same_store_independently() {
    let store = test_store(Uuid::now_v7());
    let stores = MockStoreRepo::new(vec![store.clone()]);
    let ratings = MockRatingRepo::empty();
    let usecase = RateStoreUseCase {
        stores,
        ratings: ratings.clone(),
    };

    for value in [2, 4, 4, 5] {
        let outcome = usecase
            .execute(Uuid::now_v7(), store.id, value)
            .await
            .unwrap();
        assert_eq!(outcome.outcome, RatingOutcome::Created);
    }

    let agg = ratings.aggregate_for_store(store.id).await.unwrap();
    assert_eq!(agg.count, 4);
    // [2, 4, 4, 5] must give exactly 3.75, not a float-drift neighbor.
    assert_eq!(agg.average(), Some(3.75));
}

#[tokio::test]
async fn boundary_values_accepted_out_of_range_rejected() {
    let store = test_store(Uuid::now_v7());
    let usecase = RateStoreUseCase {
        stores: MockStoreRepo::new(vec![store.clone()]),
        ratings: MockRatingRepo::empty(),
    };
    assert!(usecase.execute(Uuid::now_v7(), store.id, 1).await.is_ok());
    assert!(usecase.execute(Uuid::now_v7(), store.id, 5).await.is_ok());
    assert!(matches!(
        usecase.execute(Uuid::now_v7(), store.id, 0).await,
        Err(ApiError::InvalidRating)
    ));
    assert!(matches!(
        usecase.execute(Uuid::now_v7(), store.id, 6).await,
        Err(ApiError::InvalidRating)
    ));
}

#[tokio::test]
async fn average_updates_immediately_after_modification() {
    let store = test_store(Uuid::now_v7());
    let stores = MockStoreRepo::new(vec![store.clone()]);
    let ratings = MockRatingRepo::empty();
    let rate = RateStoreUseCase {
        stores: stores.clone(),
        ratings: ratings.clone(),
    };
    let rater = test_user(Role::NormalUser);

    rate.execute(rater.id, store.id, 1).await.unwrap();
    rate.execute(Uuid::now_v7(), store.id, 1).await.unwrap();
    assert_eq!(
        ratings.aggregate_for_store(store.id).await.unwrap().average(),
        Some(1.0)
    );

    rate.execute(rater.id, store.id, 5).await.unwrap();
    let browse = BrowseStoresUseCase {
        stores,
        ratings: ratings.clone(),
    };
    let rows = browse
        .execute(
            rater.id,
            &StoreFilter::default(),
            StoreSortBy::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(rows[0].aggregate.average(), Some(3.0));
    assert_eq!(rows[0].my_rating.as_ref().unwrap().value, 5);
}

#[tokio::test]
async fn default_browse_page_returns_every_store() {
    let stores: Vec<_> = (0..12).map(|_| test_store(Uuid::now_v7())).collect();
    let browse = BrowseStoresUseCase {
        stores: MockStoreRepo::new(stores),
        ratings: MockRatingRepo::empty(),
    };
    let rows = browse
        .execute(
            Uuid::now_v7(),
            &StoreFilter::default(),
            StoreSortBy::default(),
            listing_page_request(None, None),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 12);
}

#[tokio::test]
async fn rounding_happens_only_at_presentation() {
    let store_id = Uuid::now_v7();
    let ratings = MockRatingRepo::new(vec![
        test_rating(Uuid::now_v7(), store_id, 1),
        test_rating(Uuid::now_v7(), store_id, 1),
        test_rating(Uuid::now_v7(), store_id, 2),
    ]);
    let agg = ratings.aggregate_for_store(store_id).await.unwrap();
    let exact = agg.average().unwrap();
    assert!((exact - 4.0 / 3.0).abs() < f64::EPSILON);
    assert_eq!(round2(exact), 1.33);
}
