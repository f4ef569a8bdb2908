//! Ledger store: reference checks, analytics reads and the transactions feed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;
use uuid::Uuid;

use numo_core::analytics::{LedgerSource, PeriodEntries, PeriodEntry, SourceError};
use numo_core::ledger::{EntryKind, EntryStatus, LedgerError};
use numo_shared::types::{
    AccountId, CategoryId, Cents, PageRequest, PageResponse, PaymentOptionId, Period,
};

use super::{from_column, to_column};
use crate::entities::{expense_categories, expenses, payment_options, revenues};

/// Error types for revenue and expense operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerRepoError {
    /// Entry not found or not owned by the account.
    #[error("Entry not found: {0}")]
    NotFound(Uuid),

    /// Referenced category is not a live category of the account.
    #[error("Unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// Referenced payment option is not a live option of the account.
    #[error("Unknown payment option: {0}")]
    UnknownPaymentOption(PaymentOptionId),

    /// Invalid input.
    #[error(transparent)]
    Invalid(#[from] LedgerError),

    /// Stored JSON could not be decoded.
    #[error("Corrupt stored data: {0}")]
    Corrupt(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Checks that a payment option is live and owned by the account.
pub(crate) async fn ensure_payment_option<C: ConnectionTrait>(
    db: &C,
    account_id: AccountId,
    id: Option<PaymentOptionId>,
) -> Result<(), LedgerRepoError> {
    let Some(id) = id else {
        return Ok(());
    };
    let found = payment_options::Entity::find_by_id(id.into_inner())
        .filter(payment_options::Column::AccountId.eq(account_id.into_inner()))
        .filter(payment_options::Column::DeletedAt.is_null())
        .one(db)
        .await?;
    found
        .map(|_| ())
        .ok_or(LedgerRepoError::UnknownPaymentOption(id))
}

/// Checks that a category is live and owned by the account.
pub(crate) async fn ensure_category<C: ConnectionTrait>(
    db: &C,
    account_id: AccountId,
    id: Option<CategoryId>,
) -> Result<(), LedgerRepoError> {
    let Some(id) = id else {
        return Ok(());
    };
    let found = expense_categories::Entity::find_by_id(id.into_inner())
        .filter(expense_categories::Column::AccountId.eq(account_id.into_inner()))
        .filter(expense_categories::Column::DeletedAt.is_null())
        .one(db)
        .await?;
    found.map(|_| ()).ok_or(LedgerRepoError::UnknownCategory(id))
}

/// One row of the recent-transactions feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionItem {
    /// Entry ID.
    pub id: Uuid,
    /// Revenue or expense.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Description.
    pub description: String,
    /// Amount in cents.
    pub amount: Cents,
    /// Budget month.
    pub month: u32,
    /// Budget year.
    pub year: i32,
    /// Day of month.
    pub day: u32,
    /// Category (expenses only).
    pub category_id: Option<Uuid>,
    /// Payment option.
    pub payment_option_id: Option<Uuid>,
    /// Created timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<revenues::Model> for TransactionItem {
    fn from(r: revenues::Model) -> Self {
        Self {
            id: r.id,
            kind: EntryKind::Revenue,
            description: r.description,
            amount: Cents::new(r.amount),
            month: from_column(r.month),
            year: r.year,
            day: from_column(r.day),
            category_id: None,
            payment_option_id: r.payment_option_id,
            created_at: r.created_at.with_timezone(&Utc),
        }
    }
}

impl From<expenses::Model> for TransactionItem {
    fn from(e: expenses::Model) -> Self {
        Self {
            id: e.id,
            kind: EntryKind::Expense,
            description: e.description,
            amount: Cents::new(e.amount),
            month: from_column(e.month),
            year: e.year,
            day: from_column(e.day),
            category_id: e.category_id,
            payment_option_id: e.payment_option_id,
            created_at: e.created_at.with_timezone(&Utc),
        }
    }
}

/// Read side of the ledger shared by analytics and the feed.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    db: DatabaseConnection,
}

impl LedgerStore {
    /// Creates a new ledger store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads every revenue and expense of a period, tombstones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn period_entries(
        &self,
        account_id: AccountId,
        period: Period,
    ) -> Result<PeriodEntries, DbErr> {
        let month = to_column(period.month());
        let year = period.year();

        let revenue_rows = revenues::Entity::find()
            .filter(revenues::Column::AccountId.eq(account_id.into_inner()))
            .filter(revenues::Column::Year.eq(year))
            .filter(revenues::Column::Month.eq(month))
            .all(&self.db);
        let expense_rows = expenses::Entity::find()
            .filter(expenses::Column::AccountId.eq(account_id.into_inner()))
            .filter(expenses::Column::Year.eq(year))
            .filter(expenses::Column::Month.eq(month))
            .all(&self.db);

        let (revenue_rows, expense_rows) = tokio::try_join!(revenue_rows, expense_rows)?;

        let entries = revenue_rows
            .into_iter()
            .map(|r| PeriodEntry {
                kind: EntryKind::Revenue,
                amount: Cents::new(r.amount),
                status: EntryStatus::from_tombstone(r.deleted_at.as_ref()),
            })
            .chain(expense_rows.into_iter().map(|e| PeriodEntry {
                kind: EntryKind::Expense,
                amount: Cents::new(e.amount),
                status: EntryStatus::from_tombstone(e.deleted_at.as_ref()),
            }))
            .collect();

        Ok(PeriodEntries::new(period, entries))
    }

    /// Live revenues and expenses merged newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent_transactions(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> Result<PageResponse<TransactionItem>, DbErr> {
        // The merged window ends at offset + limit + 1, so each side needs
        // at most that many rows.
        let window = page.offset() + page.fetch_limit();

        let revenue_rows = revenues::Entity::find()
            .filter(revenues::Column::AccountId.eq(account_id.into_inner()))
            .filter(revenues::Column::DeletedAt.is_null())
            .order_by_desc(revenues::Column::CreatedAt)
            .order_by_desc(revenues::Column::Id)
            .limit(window)
            .all(&self.db);
        let expense_rows = expenses::Entity::find()
            .filter(expenses::Column::AccountId.eq(account_id.into_inner()))
            .filter(expenses::Column::DeletedAt.is_null())
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .limit(window)
            .all(&self.db);

        let (revenue_rows, expense_rows) = tokio::try_join!(revenue_rows, expense_rows)?;

        let mut merged: Vec<TransactionItem> = revenue_rows
            .into_iter()
            .map(TransactionItem::from)
            .chain(expense_rows.into_iter().map(TransactionItem::from))
            .collect();
        merged.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let fetched = merged
            .into_iter()
            .skip(offset)
            .take(usize::try_from(page.fetch_limit()).unwrap_or(usize::MAX))
            .collect();

        Ok(PageResponse::from_fetched(fetched, page))
    }
}

#[async_trait]
impl LedgerSource for LedgerStore {
    async fn list_entries(
        &self,
        account_id: AccountId,
        period: Period,
    ) -> Result<PeriodEntries, SourceError> {
        Ok(self.period_entries(account_id, period).await?)
    }
}
