//! Post-transaction repository for posted charge operations.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{checkins, post_transactions, sea_orm_active_enums::ChargeStatus};

/// Error types for charge operations.
#[derive(Debug, thiserror::Error)]
pub enum PostTransactionError {
    /// Charge not found.
    #[error("Charge not found: {0}")]
    NotFound(i64),

    /// Folio not found.
    #[error("Folio not found: {0}")]
    FolioNotFound(String),

    /// Cancelled charges cannot be modified.
    #[error("Charge {0} is cancelled")]
    Cancelled(i64),

    /// Amount must be positive.
    #[error("Charge amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for posting a charge to a folio.
#[derive(Debug, Clone)]
pub struct CreateChargeInput {
    /// Folio being charged.
    pub folio_no: String,
    /// Transaction date.
    pub trans_date: NaiveDate,
    /// Account head (e.g. `ROOM_RENT`, `RESTAURANT`).
    pub acc_head: String,
    /// Source voucher number.
    pub voucher_no: Option<String>,
    /// Charge amount.
    pub amount: Decimal,
    /// Free-text narration.
    pub narration: Option<String>,
    /// User who posted the charge.
    pub user_id: Option<i64>,
}

/// Input for updating a charge. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateChargeInput {
    /// New transaction date.
    pub trans_date: Option<NaiveDate>,
    /// New account head.
    pub acc_head: Option<String>,
    /// New voucher number.
    pub voucher_no: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New narration.
    pub narration: Option<String>,
    /// New status.
    pub status: Option<ChargeStatus>,
}

/// Post-transaction repository for charge posting.
#[derive(Debug, Clone)]
pub struct PostTransactionRepository {
    db: DatabaseConnection,
}

impl PostTransactionRepository {
    /// Creates a new post-transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a charge to a folio, copying guest and room details from the
    /// checkin record. New charges start as `pending`.
    ///
    /// # Errors
    ///
    /// Returns an error if the folio does not exist, the amount is not
    /// positive, or the database operation fails.
    pub async fn create_charge(
        &self,
        input: CreateChargeInput,
    ) -> Result<post_transactions::Model, PostTransactionError> {
        if input.amount <= Decimal::ZERO {
            return Err(PostTransactionError::NonPositiveAmount(input.amount));
        }

        let checkin = checkins::Entity::find()
            .filter(checkins::Column::FolioNo.eq(input.folio_no.as_str()))
            .one(&self.db)
            .await?
            .ok_or_else(|| PostTransactionError::FolioNotFound(input.folio_no.clone()))?;

        let now = Utc::now().into();
        let charge = post_transactions::ActiveModel {
            folio_no: Set(checkin.folio_no),
            reservation_no: Set(checkin.reservation_no),
            room_no: Set(Some(checkin.room_no)),
            guest_name: Set(Some(checkin.guest_name)),
            trans_date: Set(input.trans_date),
            acc_head: Set(input.acc_head),
            voucher_no: Set(input.voucher_no),
            amount: Set(input.amount),
            narration: Set(input.narration),
            status: Set(ChargeStatus::Pending),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = charge.insert(&self.db).await?;
        Ok(result)
    }

    /// Gets a charge by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the charge is not found or the query fails.
    pub async fn get_charge(&self, id: i64) -> Result<post_transactions::Model, PostTransactionError> {
        let charge = post_transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PostTransactionError::NotFound(id))?;
        Ok(charge)
    }

    /// Lists all charges, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_charges(&self) -> Result<Vec<post_transactions::Model>, PostTransactionError> {
        let charges = post_transactions::Entity::find()
            .order_by_desc(post_transactions::Column::TransDate)
            .order_by_desc(post_transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(charges)
    }

    /// Lists non-cancelled charges against a folio, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_folio(
        &self,
        folio_no: &str,
    ) -> Result<Vec<post_transactions::Model>, PostTransactionError> {
        let charges = post_transactions::Entity::find()
            .filter(post_transactions::Column::FolioNo.eq(folio_no))
            .filter(post_transactions::Column::Status.ne(ChargeStatus::Cancelled))
            .order_by_asc(post_transactions::Column::TransDate)
            .order_by_asc(post_transactions::Column::Id)
            .all(&self.db)
            .await?;
        Ok(charges)
    }

    /// Lists charges posted under an account head.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_acc_head(
        &self,
        acc_head: &str,
    ) -> Result<Vec<post_transactions::Model>, PostTransactionError> {
        let charges = post_transactions::Entity::find()
            .filter(post_transactions::Column::AccHead.eq(acc_head))
            .filter(post_transactions::Column::Status.ne(ChargeStatus::Cancelled))
            .order_by_desc(post_transactions::Column::TransDate)
            .all(&self.db)
            .await?;
        Ok(charges)
    }

    /// Lists charges still pending across all folios.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_outstanding(
        &self,
    ) -> Result<Vec<post_transactions::Model>, PostTransactionError> {
        let charges = post_transactions::Entity::find()
            .filter(post_transactions::Column::Status.eq(ChargeStatus::Pending))
            .order_by_asc(post_transactions::Column::TransDate)
            .all(&self.db)
            .await?;
        Ok(charges)
    }

    /// Sums non-cancelled charges against a folio.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn total_by_folio(&self, folio_no: &str) -> Result<Decimal, PostTransactionError> {
        let charges = self.find_by_folio(folio_no).await?;
        Ok(charges.iter().map(|c| c.amount).sum())
    }

    /// Updates a charge that has not been cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the charge is not found, cancelled, the new
    /// amount is invalid, or the database operation fails.
    pub async fn update_charge(
        &self,
        id: i64,
        input: UpdateChargeInput,
    ) -> Result<post_transactions::Model, PostTransactionError> {
        let charge = self.get_charge(id).await?;

        if charge.status == ChargeStatus::Cancelled {
            return Err(PostTransactionError::Cancelled(id));
        }

        let mut active: post_transactions::ActiveModel = charge.into();

        if let Some(trans_date) = input.trans_date {
            active.trans_date = Set(trans_date);
        }
        if let Some(acc_head) = input.acc_head {
            active.acc_head = Set(acc_head);
        }
        if let Some(voucher_no) = input.voucher_no {
            active.voucher_no = Set(Some(voucher_no));
        }
        if let Some(amount) = input.amount {
            if amount <= Decimal::ZERO {
                return Err(PostTransactionError::NonPositiveAmount(amount));
            }
            active.amount = Set(amount);
        }
        if let Some(narration) = input.narration {
            active.narration = Set(Some(narration));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Cancels a charge. Cancelled charges drop out of folio totals but
    /// stay on record.
    ///
    /// # Errors
    ///
    /// Returns an error if the charge is not found or the database
    /// operation fails.
    pub async fn cancel_charge(&self, id: i64) -> Result<post_transactions::Model, PostTransactionError> {
        let charge = self.get_charge(id).await?;
        let mut active: post_transactions::ActiveModel = charge.into();
        active.status = Set(ChargeStatus::Cancelled);
        active.updated_at = Set(Utc::now().into());

        let cancelled = active.update(&self.db).await?;
        Ok(cancelled)
    }
}
