use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::UserResponse;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::auth::{
    GetProfileUseCase, LoginUseCase, SignupInput, SignupUseCase, UpdatePasswordUseCase,
};

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ── POST /api/auth/signup ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    pub password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let usecase = SignupUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret().to_owned(),
    };
    let (user, token) = usecase
        .execute(SignupInput {
            name: body.name,
            email: body.email,
            address: body.address,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret().to_owned(),
    };
    let (user, token) = usecase.execute(&body.email, &body.password).await?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

// ── GET /api/auth/me ─────────────────────────────────────────────────────────

pub async fn me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── PUT /api/auth/password ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

pub async fn update_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdatePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = UpdatePasswordUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(identity.user_id, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}
