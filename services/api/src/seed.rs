//! Startup seeding: the administrator account and the one-time
//! transactions import.

use anyhow::Context as _;
use chrono::Utc;
use ratehub_domain::Role;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::repository::{TransactionRepository, UserRepository};
use crate::domain::types::{Transaction, User, normalize_email};
use crate::error::ApiError;
use crate::password;

/// Ensures the configured admin account exists. Safe to run on every boot;
/// an existing account (including one created by a concurrently starting
/// replica) is left untouched.
pub async fn seed_admin<R: UserRepository>(
    repo: &R,
    email: &str,
    plain_password: &str,
) -> Result<(), ApiError> {
    let email = normalize_email(email);
    if repo.find_by_email(&email).await?.is_some() {
        tracing::debug!(%email, "admin account already present");
        return Ok(());
    }

    let now = Utc::now();
    let admin = User {
        id: Uuid::now_v7(),
        name: "Platform Operations Administrator".to_owned(),
        email: email.clone(),
        password_hash: password::hash_password(plain_password)?,
        address: "Platform Headquarters".to_owned(),
        role: Role::Admin,
        created_at: now,
        updated_at: now,
    };
    match repo.create(&admin).await {
        Ok(()) => {
            tracing::info!(%email, "seeded admin account");
            Ok(())
        }
        Err(ApiError::EmailTaken) => Ok(()),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord {
    id: i32,
    title: String,
    price: f64,
    description: String,
    category: String,
    image: Option<String>,
    sold: bool,
    date_of_sale: chrono::DateTime<chrono::Utc>,
}

/// Imports the external transactions dataset once. Skipped when the table
/// already has rows, so restarts never duplicate data.
pub async fn seed_transactions<R: TransactionRepository>(
    repo: &R,
    source_url: &str,
) -> Result<(), ApiError> {
    if repo.count().await? > 0 {
        tracing::debug!("transactions already imported, skipping");
        return Ok(());
    }

    let records: Vec<SeedRecord> = reqwest::get(source_url)
        .await
        .context("fetch transactions dataset")?
        .error_for_status()
        .context("transactions dataset request failed")?
        .json()
        .await
        .context("decode transactions dataset")?;

    let transactions: Vec<Transaction> = records
        .into_iter()
        .map(|r| Transaction {
            id: r.id,
            title: r.title,
            price: r.price,
            description: r.description,
            category: r.category,
            image: r.image,
            sold: r.sold,
            date_of_sale: r.date_of_sale,
        })
        .collect();

    let count = transactions.len();
    repo.insert_many(&transactions).await?;
    tracing::info!(count, "imported transactions dataset");
    Ok(())
}
