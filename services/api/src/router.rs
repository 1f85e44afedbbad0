use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use ratehub_core::health::{healthz, readyz};
use ratehub_core::middleware::request_id_layer;

use crate::handlers::{admin, auth, owner, transaction, user};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/password", put(auth::update_password))
        // Admin
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route("/api/admin/users", post(admin::create_user))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/stores", post(admin::create_store))
        .route("/api/admin/stores", get(admin::list_stores))
        // Store owner
        .route("/api/owner/dashboard", get(owner::dashboard))
        // Normal user
        .route("/api/user/stores", get(user::browse_stores))
        .route("/api/user/ratings", post(user::rate_store))
        // Transactions
        .route("/api/transactions", get(transaction::list_transactions))
        .route(
            "/api/transactions/statistics",
            get(transaction::statistics),
        )
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
