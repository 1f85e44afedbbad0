use chrono::{DateTime, Utc};
use ratehub_domain::{Role, Sort};
use uuid::Uuid;

/// A platform account. The stored role never changes after creation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A registered store. Each store belongs to exactly one owner account.
#[derive(Debug, Clone)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single user's rating of a store, 1 to 5.
#[derive(Debug, Clone)]
pub struct Rating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub store_id: Uuid,
    pub value: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Imported product sale record.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i32,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub sold: bool,
    pub date_of_sale: DateTime<Utc>,
}

/// Sum and count of rating values for one store; the average is derived
/// on demand, never stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingAggregate {
    pub sum: i64,
    pub count: i64,
}

impl RatingAggregate {
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}

/// Whether a rating submission inserted a new row or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOutcome {
    Created,
    Modified,
}

/// Result of the rating upsert path.
#[derive(Debug, Clone, Copy)]
pub struct RatingUpsert {
    pub rating_id: Uuid,
    pub outcome: RatingOutcome,
}

/// Optional filters for admin user listings, all case-insensitive substring
/// matches. `search` matches any of name, email or address; the per-field
/// filters and `role` each narrow the result further.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
}

/// Sortable columns for user listings.
#[derive(Debug, Clone, Copy)]
pub enum UserSortBy {
    Id(Sort),
    Name(Sort),
    Email(Sort),
    Address(Sort),
    Role(Sort),
}

impl Default for UserSortBy {
    fn default() -> Self {
        Self::Id(Sort::Asc)
    }
}

impl UserSortBy {
    pub fn from_query(field: &str, sort: Sort) -> Option<Self> {
        match field {
            "id" => Some(Self::Id(sort)),
            "name" => Some(Self::Name(sort)),
            "email" => Some(Self::Email(sort)),
            "address" => Some(Self::Address(sort)),
            "role" => Some(Self::Role(sort)),
            _ => None,
        }
    }
}

/// Optional substring filters for store listings. `search` matches any of
/// name, email or address.
#[derive(Debug, Clone, Default)]
pub struct StoreFilter {
    pub search: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Sortable columns for store listings.
#[derive(Debug, Clone, Copy)]
pub enum StoreSortBy {
    Id(Sort),
    Name(Sort),
    Email(Sort),
    Address(Sort),
}

impl Default for StoreSortBy {
    fn default() -> Self {
        Self::Id(Sort::Asc)
    }
}

impl StoreSortBy {
    pub fn from_query(field: &str, sort: Sort) -> Option<Self> {
        match field {
            "id" => Some(Self::Id(sort)),
            "name" => Some(Self::Name(sort)),
            "email" => Some(Self::Email(sort)),
            "address" => Some(Self::Address(sort)),
            _ => None,
        }
    }
}

/// Aggregate figures for one sale month across all years.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionStats {
    pub total_sale_amount: f64,
    pub sold_count: i64,
    pub unsold_count: i64,
}

/// Lowercases and trims an email so uniqueness checks and logins are
/// case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Display names are 20 to 60 characters.
pub fn validate_name(name: &str) -> bool {
    let len = name.chars().count();
    (20..=60).contains(&len)
}

/// Minimal shape check: one `@` with a dot somewhere after it.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.contains(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Addresses are non-empty and at most 400 characters.
pub fn validate_address(address: &str) -> bool {
    let len = address.chars().count();
    (1..=400).contains(&len)
}

/// Passwords are 8 to 16 characters with at least one ASCII uppercase letter
/// and at least one of `!@#$%^&*`.
pub fn validate_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(8..=16).contains(&len) {
        return false;
    }
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_special = password.chars().any(|c| "!@#$%^&*".contains(c));
    has_upper && has_special
}

/// Ratings are whole numbers 1 to 5.
pub fn validate_rating(value: i16) -> bool {
    (1..=5).contains(&value)
}

/// Rounds to two decimal places for response payloads. Stored values are
/// never rounded.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
