use ratehub_domain::PageRequest;

use crate::domain::repository::TransactionRepository;
use crate::domain::types::{Transaction, TransactionStats};
use crate::error::ApiError;

/// Parses a sale month given either as a full English month name
/// (case-insensitive) or as a number 1-12.
pub fn month_number(s: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let normalized = s.trim().to_ascii_lowercase();
    if let Some(idx) = MONTHS.iter().position(|m| *m == normalized) {
        return Some(idx as u32 + 1);
    }
    match normalized.parse::<u32>() {
        Ok(n) if (1..=12).contains(&n) => Some(n),
        _ => None,
    }
}

// ── ListTransactions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TransactionPage {
    pub records: Vec<Transaction>,
    pub total: i64,
}

pub struct ListTransactionsUseCase<T: TransactionRepository> {
    pub repo: T,
}

impl<T: TransactionRepository> ListTransactionsUseCase<T> {
    pub async fn execute(
        &self,
        month: Option<&str>,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<TransactionPage, ApiError> {
        let month = match month {
            Some(raw) => Some(month_number(raw).ok_or(ApiError::InvalidQuery)?),
            None => None,
        };
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let (records, total) = self.repo.list(month, search, page).await?;
        Ok(TransactionPage { records, total })
    }
}

// ── Statistics ───────────────────────────────────────────────────────────────

pub struct TransactionStatsUseCase<T: TransactionRepository> {
    pub repo: T,
}

impl<T: TransactionRepository> TransactionStatsUseCase<T> {
    pub async fn execute(&self, month: &str) -> Result<TransactionStats, ApiError> {
        let month = month_number(month).ok_or(ApiError::InvalidQuery)?;
        self.repo.statistics(month).await
    }
}
