use sea_orm::Database;
use tracing::{info, warn};

use ratehub_api::config::ApiConfig;
use ratehub_api::router::build_router;
use ratehub_api::seed::{seed_admin, seed_transactions};
use ratehub_api::state::AppState;

#[tokio::main]
async fn main() {
    ratehub_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState::new(db, config.jwt_secret);

    if let Err(e) = seed_admin(&state.user_repo(), &config.admin_email, &config.admin_password).await
    {
        // The admin account can also be created manually; boot anyway.
        warn!(error = %e, "admin seed failed");
    }
    if let Some(url) = &config.transactions_seed_url {
        if let Err(e) = seed_transactions(&state.transaction_repo(), url).await {
            warn!(error = %e, "transactions import failed");
        }
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
