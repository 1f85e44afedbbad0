use axum::{Json, extract::State};
use ratehub_domain::Role;
use serde::Serialize;

use crate::error::ApiError;
use crate::handlers::rounded_average;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::owner::OwnerDashboardUseCase;

// ── GET /api/owner/dashboard ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RaterResponse {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub value: i16,
    #[serde(serialize_with = "ratehub_core::serde::to_rfc3339_ms")]
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct OwnerDashboardResponse {
    pub store_id: String,
    pub store_name: String,
    pub average_rating: f64,
    pub rating_count: i64,
    pub raters: Vec<RaterResponse>,
}

pub async fn dashboard(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<OwnerDashboardResponse>, ApiError> {
    identity.require(&[Role::StoreOwner])?;
    let usecase = OwnerDashboardUseCase {
        users: state.user_repo(),
        stores: state.store_repo(),
        ratings: state.rating_repo(),
    };
    let dashboard = usecase.execute(identity.user_id).await?;

    Ok(Json(OwnerDashboardResponse {
        store_id: dashboard.store.id.to_string(),
        store_name: dashboard.store.name,
        average_rating: rounded_average(dashboard.aggregate.average()),
        rating_count: dashboard.aggregate.count,
        raters: dashboard
            .raters
            .into_iter()
            .map(|(user, rating)| RaterResponse {
                user_id: user.id.to_string(),
                name: user.name,
                email: user.email,
                value: rating.value,
                submitted_at: rating.created_at,
            })
            .collect(),
    }))
}
