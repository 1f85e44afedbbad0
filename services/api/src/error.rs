use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("store not found")]
    StoreNotFound,
    #[error("owner not found or not a store owner")]
    OwnerNotFound,
    #[error("email already in use")]
    EmailTaken,
    #[error("owner already has a store")]
    OwnerHasStore,
    #[error("name must be between 20 and 60 characters")]
    InvalidName,
    #[error("invalid email format")]
    InvalidEmail,
    #[error("address must be 1 to 400 characters")]
    InvalidAddress,
    #[error("password must be 8-16 characters with one uppercase letter and one of !@#$%^&*")]
    InvalidPassword,
    #[error("invalid role")]
    InvalidRole,
    #[error("rating must be between 1 and 5")]
    InvalidRating,
    #[error("invalid query parameter")]
    InvalidQuery,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::StoreNotFound => "STORE_NOT_FOUND",
            Self::OwnerNotFound => "OWNER_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::OwnerHasStore => "OWNER_HAS_STORE",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidRating => "INVALID_RATING",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::StoreNotFound | Self::OwnerNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::OwnerHasStore => StatusCode::CONFLICT,
            Self::InvalidName
            | Self::InvalidEmail
            | Self::InvalidAddress
            | Self::InvalidPassword
            | Self::InvalidRole
            | Self::InvalidRating
            | Self::InvalidQuery => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
