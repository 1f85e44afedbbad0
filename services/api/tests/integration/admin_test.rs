use ratehub_api::domain::types::{UserFilter, UserSortBy};
use ratehub_api::error::ApiError;
use ratehub_api::handlers::listing_page_request;
use ratehub_api::usecase::admin::{
    CreateStoreInput, CreateStoreUseCase, CreateUserInput, CreateUserUseCase, DashboardUseCase,
    ListStoresUseCase, ListUsersUseCase,
};
use ratehub_domain::{PageRequest, Role, Sort};
use uuid::Uuid;

use crate::helpers::{
    MockRatingRepo, MockStoreRepo, MockUserRepo, test_rating, test_store, test_user,
};

#[tokio::test]
async fn dashboard_reports_entity_totals() {
    let owner = test_user(Role::StoreOwner);
    let store = test_store(owner.id);
    let usecase = DashboardUseCase {
        users: MockUserRepo::new(vec![owner, test_user(Role::NormalUser)]),
        stores: MockStoreRepo::new(vec![store.clone()]),
        ratings: MockRatingRepo::new(vec![
            test_rating(Uuid::now_v7(), store.id, 3),
            test_rating(Uuid::now_v7(), store.id, 4),
        ]),
    };
    let counts = usecase.execute().await.unwrap();
    assert_eq!((counts.users, counts.stores, counts.ratings), (2, 1, 2));
}

#[tokio::test]
async fn admin_creates_accounts_with_any_role() {
    let repo = MockUserRepo::empty();
    let usecase = CreateUserUseCase { repo: repo.clone() };

    for (i, role) in [Role::Admin, Role::NormalUser, Role::StoreOwner]
        .into_iter()
        .enumerate()
    {
        let user = usecase
            .execute(CreateUserInput {
                name: "Administratively Created Person".to_owned(),
                email: format!("created-{i}@example.com"),
                address: "9 Admin Way".to_owned(),
                password: "Create@me1".to_owned(),
                role,
            })
            .await
            .unwrap();
        assert_eq!(user.role, role);
    }
}

#[tokio::test]
async fn admin_create_rejects_invalid_profiles() {
    let usecase = CreateUserUseCase {
        repo: MockUserRepo::empty(),
    };
    let base = || CreateUserInput {
        name: "Administratively Created Person".to_owned(),
        email: "valid@example.com".to_owned(),
        address: "9 Admin Way".to_owned(),
        password: "Create@me1".to_owned(),
        role: Role::NormalUser,
    };

    let mut bad_name = base();
    bad_name.name = "Too Short".to_owned();
    assert!(matches!(
        usecase.execute(bad_name).await,
        Err(ApiError::InvalidName)
    ));

    let mut bad_email = base();
    bad_email.email = "not-an-email".to_owned();
    assert!(matches!(
        usecase.execute(bad_email).await,
        Err(ApiError::InvalidEmail)
    ));

    let mut bad_password = base();
    bad_password.password = "nocaps@123".to_owned();
    assert!(matches!(
        usecase.execute(bad_password).await,
        Err(ApiError::InvalidPassword)
    ));
}

#[tokio::test]
async fn user_listing_filters_and_sorts() {
    let mut alice = test_user(Role::NormalUser);
    alice.name = "Alice From The Search Tests".to_owned();
    let mut bob = test_user(Role::StoreOwner);
    bob.name = "Bob From The Search Tests!!".to_owned();

    let usecase = ListUsersUseCase {
        users: MockUserRepo::new(vec![alice.clone(), bob.clone()]),
        stores: MockStoreRepo::empty(),
        ratings: MockRatingRepo::empty(),
    };

    // Case-insensitive substring filter.
    let filter = UserFilter {
        name: Some("alice".to_owned()),
        ..Default::default()
    };
    let rows = usecase
        .execute(&filter, UserSortBy::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user.id, alice.id);

    // Role filter combined with name sort.
    let filter = UserFilter {
        role: Some(Role::StoreOwner),
        ..Default::default()
    };
    let rows = usecase
        .execute(&filter, UserSortBy::Name(Sort::Desc), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user.id, bob.id);
}

#[tokio::test]
async fn one_search_term_matches_any_column() {
    let mut by_name = test_user(Role::NormalUser);
    by_name.name = "Jonathan Smithfield Esquire Jr".to_owned();
    let mut by_address = test_user(Role::NormalUser);
    by_address.address = "4 Smith Street".to_owned();
    let mut by_email = test_user(Role::NormalUser);
    by_email.email = "smith@example.com".to_owned();
    let unrelated = test_user(Role::NormalUser);

    let usecase = ListUsersUseCase {
        users: MockUserRepo::new(vec![
            by_name.clone(),
            by_address.clone(),
            by_email.clone(),
            unrelated.clone(),
        ]),
        stores: MockStoreRepo::empty(),
        ratings: MockRatingRepo::empty(),
    };
    let filter = UserFilter {
        search: Some("SMITH".to_owned()),
        ..Default::default()
    };
    let rows = usecase
        .execute(&filter, UserSortBy::default(), PageRequest::default())
        .await
        .unwrap();
    let ids: Vec<Uuid> = rows.iter().map(|r| r.user.id).collect();
    assert_eq!(rows.len(), 3);
    assert!(ids.contains(&by_name.id));
    assert!(ids.contains(&by_address.id));
    assert!(ids.contains(&by_email.id));
    assert!(!ids.contains(&unrelated.id));
}

#[tokio::test]
async fn default_user_listing_page_returns_every_row() {
    let users: Vec<_> = (0..12).map(|_| test_user(Role::NormalUser)).collect();
    let usecase = ListUsersUseCase {
        users: MockUserRepo::new(users),
        stores: MockStoreRepo::empty(),
        ratings: MockRatingRepo::empty(),
    };
    let rows = usecase
        .execute(
            &UserFilter::default(),
            UserSortBy::default(),
            listing_page_request(None, None),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 12);
}

#[tokio::test]
async fn owner_rows_carry_their_store_average() {
    let owner = test_user(Role::StoreOwner);
    let store = test_store(owner.id);
    let usecase = ListUsersUseCase {
        users: MockUserRepo::new(vec![owner.clone()]),
        stores: MockStoreRepo::new(vec![store.clone()]),
        ratings: MockRatingRepo::new(vec![
            test_rating(Uuid::now_v7(), store.id, 4),
            test_rating(Uuid::now_v7(), store.id, 5),
        ]),
    };
    let rows = usecase
        .execute(&UserFilter::default(), UserSortBy::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(rows[0].store_rating, Some(4.5));
}

#[tokio::test]
async fn store_creation_enforces_owner_rules() {
    let owner = test_user(Role::StoreOwner);
    let normal = test_user(Role::NormalUser);
    let usecase = CreateStoreUseCase {
        users: MockUserRepo::new(vec![owner.clone(), normal.clone()]),
        stores: MockStoreRepo::empty(),
    };
    let input = |owner_id: Uuid, email: &str| CreateStoreInput {
        name: "Integration Test Store".to_owned(),
        email: email.to_owned(),
        address: "10 Commerce Street".to_owned(),
        owner_id,
    };

    // Unknown owner and wrong-role owner are both 404s.
    assert!(matches!(
        usecase
            .execute(input(Uuid::now_v7(), "a@stores.example.com"))
            .await,
        Err(ApiError::OwnerNotFound)
    ));
    assert!(matches!(
        usecase.execute(input(normal.id, "b@stores.example.com")).await,
        Err(ApiError::OwnerNotFound)
    ));

    // First store succeeds, a second one for the same owner conflicts.
    usecase
        .execute(input(owner.id, "c@stores.example.com"))
        .await
        .unwrap();
    assert!(matches!(
        usecase.execute(input(owner.id, "d@stores.example.com")).await,
        Err(ApiError::OwnerHasStore)
    ));
}

#[tokio::test]
async fn store_listing_includes_unrated_stores() {
    let rated = test_store(Uuid::now_v7());
    let unrated = test_store(Uuid::now_v7());
    let usecase = ListStoresUseCase {
        stores: MockStoreRepo::new(vec![rated.clone(), unrated.clone()]),
        ratings: MockRatingRepo::new(vec![test_rating(Uuid::now_v7(), rated.id, 3)]),
    };
    let rows = usecase
        .execute(
            &Default::default(),
            Default::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    let unrated_row = rows.iter().find(|r| r.store.id == unrated.id).unwrap();
    assert_eq!(unrated_row.aggregate.count, 0);
    assert_eq!(unrated_row.aggregate.average(), None);
}
