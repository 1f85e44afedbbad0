//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use ratehub_domain::Role;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::token;

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
///
/// Returns 401 if the header is absent, the token fails verification, or the
/// subject is not a UUID. Role enforcement (403) is done by handlers via
/// [`Identity::require`] after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl Identity {
    /// Rejects callers whose role is not in `roles`.
    pub fn require(&self, roles: &[Role]) -> Result<(), ApiError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let state = AppState::from_ref(state);

        let identity = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .and_then(|raw| token::verify_token(raw, state.jwt_secret()).ok())
            .and_then(|claims| {
                let user_id = claims.sub.parse::<Uuid>().ok()?;
                Some(Self {
                    user_id,
                    role: claims.role,
                })
            });

        async move { identity.ok_or(ApiError::Unauthenticated) }
    }
}
