//! Role isolation over the real router: every protected route must return
//! 401 without a credential and 403 for a valid credential of the wrong
//! role, before any data access happens.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::DatabaseConnection;
use tower::ServiceExt as _;
use uuid::Uuid;

use ratehub_api::router::build_router;
use ratehub_api::state::AppState;
use ratehub_api::token;
use ratehub_domain::Role;

use crate::helpers::TEST_JWT_SECRET;

fn test_router() -> axum::Router {
    build_router(AppState::new(
        DatabaseConnection::default(),
        TEST_JWT_SECRET.to_owned(),
    ))
}

fn bearer(role: Role) -> String {
    let token = token::issue_token(Uuid::now_v7(), role, TEST_JWT_SECRET).unwrap();
    format!("Bearer {token}")
}

async fn get_with(path: &str, authorization: Option<String>) -> StatusCode {
    let mut builder = Request::get(path);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    let response = test_router()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    response.status()
}

#[tokio::test]
async fn protected_routes_require_a_credential() {
    for path in [
        "/api/auth/me",
        "/api/admin/dashboard",
        "/api/admin/users",
        "/api/admin/stores",
        "/api/owner/dashboard",
        "/api/user/stores",
    ] {
        assert_eq!(
            get_with(path, None).await,
            StatusCode::UNAUTHORIZED,
            "no credential on {path}"
        );
    }
}

#[tokio::test]
async fn admin_routes_reject_other_roles() {
    for path in ["/api/admin/dashboard", "/api/admin/users", "/api/admin/stores"] {
        for role in [Role::NormalUser, Role::StoreOwner] {
            assert_eq!(
                get_with(path, Some(bearer(role))).await,
                StatusCode::FORBIDDEN,
                "{role:?} on {path}"
            );
        }
    }
}

#[tokio::test]
async fn owner_dashboard_rejects_admin_and_normal_user() {
    for role in [Role::Admin, Role::NormalUser] {
        assert_eq!(
            get_with("/api/owner/dashboard", Some(bearer(role))).await,
            StatusCode::FORBIDDEN,
            "{role:?}"
        );
    }
}

#[tokio::test]
async fn user_store_browsing_is_normal_user_only() {
    for role in [Role::Admin, Role::StoreOwner] {
        assert_eq!(
            get_with("/api/user/stores", Some(bearer(role))).await,
            StatusCode::FORBIDDEN,
            "{role:?}"
        );
    }
}

#[tokio::test]
async fn tampered_token_is_unauthenticated_not_forbidden() {
    let foreign = token::issue_token(Uuid::now_v7(), Role::Admin, "wrong-secret").unwrap();
    assert_eq!(
        get_with("/api/admin/dashboard", Some(format!("Bearer {foreign}"))).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn health_endpoints_are_public() {
    assert_eq!(get_with("/healthz", None).await, StatusCode::OK);
    assert_eq!(get_with("/readyz", None).await, StatusCode::OK);
}
