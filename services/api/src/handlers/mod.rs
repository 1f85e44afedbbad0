pub mod admin;
pub mod auth;
pub mod owner;
pub mod transaction;
pub mod user;

use ratehub_domain::{PageRequest, Sort};
use serde::Serialize;

use crate::domain::types::{User, round2};
use crate::error::ApiError;

/// Account projection shared by every handler that returns a user. The
/// password hash never appears in any response.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: ratehub_domain::Role,
    #[serde(serialize_with = "ratehub_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "ratehub_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            address: user.address,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Two-decimal average for responses, 0.00 when nothing is rated yet.
pub(crate) fn rounded_average(average: Option<f64>) -> f64 {
    round2(average.unwrap_or(0.0))
}

pub(crate) fn parse_sort(order: Option<&str>) -> Result<Sort, ApiError> {
    match order {
        Some(raw) => Sort::from_query(raw).ok_or(ApiError::InvalidQuery),
        None => Ok(Sort::Asc),
    }
}

pub(crate) fn page_request(per_page: Option<u32>, page: Option<u32>) -> PageRequest {
    let defaults = PageRequest::default();
    PageRequest {
        per_page: per_page.unwrap_or(defaults.per_page),
        page: page.unwrap_or(defaults.page),
    }
    .clamped()
}

/// Store and user listings return every row unless the client pages
/// explicitly, so their default `per_page` is the cap itself rather than
/// the transactions default.
pub fn listing_page_request(per_page: Option<u32>, page: Option<u32>) -> PageRequest {
    PageRequest {
        per_page: per_page.unwrap_or(PageRequest::MAX_PER_PAGE),
        page: page.unwrap_or(1),
    }
    .clamped()
}
