//! Billing repository: folio reconciliation, final bills, and settlements.
//!
//! Pulls a stay's charges, advances, and settlements together and hands
//! them to the reconciliation engine. Advances are matched both by folio
//! and by the originating reservation, so money paid before check-in still
//! lands on the final bill.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use innkeep_core::billing::journey::GuestJourney;
use innkeep_core::payment::{InvalidPaymentMode, PaymentMode};
use innkeep_core::{AdvanceLine, BillStatus, ChargeLine, Reconciliation, SettlementLine};
use innkeep_shared::types::{DocumentKind, DocumentNo};

use crate::entities::{
    advances, bill_settlements, checkins, fo_bills, post_transactions,
    sea_orm_active_enums::ChargeStatus,
};

/// Error types for billing operations.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// Folio not found.
    #[error("Folio not found: {0}")]
    FolioNotFound(String),

    /// Bill not found by ID.
    #[error("Bill not found: {0}")]
    BillNotFound(i64),

    /// No bill has been generated for the folio yet.
    #[error("No bill generated for folio {0}")]
    NoBillForFolio(String),

    /// A bill already exists for the folio.
    #[error("Folio {0} is already billed")]
    AlreadyBilled(String),

    /// The bill is already settled.
    #[error("Bill {0} is already settled")]
    AlreadySettled(String),

    /// Unknown payment mode.
    #[error(transparent)]
    InvalidPaymentMode(#[from] InvalidPaymentMode),

    /// Amount must be positive.
    #[error("Settlement amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for settling part or all of a bill.
#[derive(Debug, Clone)]
pub struct CreateSettlementInput {
    /// Folio whose bill is being settled.
    pub folio_no: String,
    /// Payment mode, in any accepted spelling.
    pub payment_mode: String,
    /// Settled amount.
    pub amount: Decimal,
    /// Settlement date.
    pub payment_date: NaiveDate,
    /// Instrument reference.
    pub reference_no: Option<String>,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// User who took the settlement.
    pub user_id: Option<i64>,
}

/// A folio's complete financial statement.
#[derive(Debug, Clone, Serialize)]
pub struct FolioStatement {
    /// The stay the statement belongs to.
    pub checkin: checkins::Model,
    /// Posted charges.
    pub charges: Vec<ChargeLine>,
    /// Advance payments, folio-linked and reservation-linked.
    pub advances: Vec<AdvanceLine>,
    /// Settlements against the generated bill, if any.
    pub settlements: Vec<SettlementLine>,
    /// The reconciled totals and status.
    pub reconciliation: Reconciliation,
}

/// Billing repository tying the money tables together.
#[derive(Debug, Clone)]
pub struct BillingRepository {
    db: DatabaseConnection,
}

impl BillingRepository {
    /// Creates a new billing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the complete statement for a folio.
    ///
    /// # Errors
    ///
    /// Returns an error if the folio does not exist or a query fails.
    pub async fn folio_statement(&self, folio_no: &str) -> Result<FolioStatement, BillingError> {
        let checkin = self.find_checkin(folio_no).await?;

        let charges = self.charge_lines(folio_no).await?;
        let advances = self
            .advance_lines(folio_no, checkin.reservation_no.as_deref())
            .await?;
        let settlements = self.settlement_lines(folio_no).await?;

        let reconciliation = Reconciliation::compute(&charges, &advances, &settlements);

        Ok(FolioStatement {
            checkin,
            charges,
            advances,
            settlements,
            reconciliation,
        })
    }

    /// Builds the guest's financial timeline for a folio.
    ///
    /// # Errors
    ///
    /// Returns an error if the folio does not exist or a query fails.
    pub async fn guest_journey(&self, folio_no: &str) -> Result<GuestJourney, BillingError> {
        let checkin = self.find_checkin(folio_no).await?;
        let charges = self.charge_lines(folio_no).await?;
        let advances = self
            .advance_lines(folio_no, checkin.reservation_no.as_deref())
            .await?;
        Ok(GuestJourney::build(&advances, &charges))
    }

    /// Generates the final bill for a folio from its reconciled statement.
    /// Each folio gets at most one bill.
    ///
    /// # Errors
    ///
    /// Returns an error if the folio does not exist, a bill already exists,
    /// or the database operation fails.
    pub async fn generate_final_bill(
        &self,
        folio_no: &str,
        remarks: Option<String>,
        user_id: Option<i64>,
    ) -> Result<fo_bills::Model, BillingError> {
        let statement = self.folio_statement(folio_no).await?;

        let txn = self.db.begin().await?;

        let existing = fo_bills::Entity::find()
            .filter(fo_bills::Column::FolioNo.eq(folio_no))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(BillingError::AlreadyBilled(folio_no.to_string()));
        }

        let today = Utc::now().date_naive();
        let prefix = DocumentNo::month_prefix(DocumentKind::Bill, today);
        let existing_in_month = fo_bills::Entity::find()
            .filter(fo_bills::Column::BillNo.starts_with(&prefix))
            .count(&txn)
            .await?;
        let bill_no = DocumentNo::next_in_month(DocumentKind::Bill, today, existing_in_month);

        let recon = &statement.reconciliation;
        let now = Utc::now().into();

        let bill = fo_bills::ActiveModel {
            bill_no: Set(bill_no.into_inner()),
            folio_no: Set(statement.checkin.folio_no.clone()),
            guest_name: Set(Some(statement.checkin.guest_name.clone())),
            room_no: Set(Some(statement.checkin.room_no.clone())),
            bill_date: Set(today),
            gross_amount: Set(recon.gross_charges),
            tax_amount: Set(Decimal::ZERO),
            net_amount: Set(recon.net_amount),
            advance_adjusted: Set(recon.total_advances),
            balance_due: Set(recon.balance_due),
            is_settled: Set(recon.status == BillStatus::Settled),
            remarks: Set(remarks),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = bill.insert(&txn).await?;
        txn.commit().await?;
        Ok(inserted)
    }

    /// Settles part or all of a folio's bill. The bill flips to settled
    /// once settlements cover its balance due.
    ///
    /// # Errors
    ///
    /// Returns an error if no bill exists for the folio, the bill is
    /// already settled, the mode or amount is invalid, or the database
    /// operation fails.
    pub async fn create_settlement(
        &self,
        input: CreateSettlementInput,
    ) -> Result<bill_settlements::Model, BillingError> {
        if input.amount <= Decimal::ZERO {
            return Err(BillingError::NonPositiveAmount(input.amount));
        }
        let mode = PaymentMode::parse(&input.payment_mode)?;

        let txn = self.db.begin().await?;

        let bill = fo_bills::Entity::find()
            .filter(fo_bills::Column::FolioNo.eq(input.folio_no.as_str()))
            .one(&txn)
            .await?
            .ok_or_else(|| BillingError::NoBillForFolio(input.folio_no.clone()))?;

        if bill.is_settled {
            return Err(BillingError::AlreadySettled(bill.bill_no));
        }

        let now = Utc::now().into();
        let settlement = bill_settlements::ActiveModel {
            bill_id: Set(bill.id),
            folio_no: Set(bill.folio_no.clone()),
            payment_mode: Set(mode.label().to_string()),
            amount: Set(input.amount),
            payment_date: Set(input.payment_date),
            reference_no: Set(input.reference_no),
            remarks: Set(input.remarks),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = settlement.insert(&txn).await?;

        let settled_so_far: Decimal = bill_settlements::Entity::find()
            .filter(bill_settlements::Column::BillId.eq(bill.id))
            .all(&txn)
            .await?
            .iter()
            .map(|s| s.amount)
            .sum();

        if settled_so_far >= bill.balance_due {
            let mut active: fo_bills::ActiveModel = bill.into();
            active.is_settled = Set(true);
            active.updated_at = Set(now);
            active.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(inserted)
    }

    /// Gets a bill by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the bill is not found or the query fails.
    pub async fn get_bill(&self, id: i64) -> Result<fo_bills::Model, BillingError> {
        let bill = fo_bills::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BillingError::BillNotFound(id))?;
        Ok(bill)
    }

    /// Gets the bill generated for a folio.
    ///
    /// # Errors
    ///
    /// Returns an error if no bill exists for the folio or the query fails.
    pub async fn get_bill_by_folio(&self, folio_no: &str) -> Result<fo_bills::Model, BillingError> {
        let bill = fo_bills::Entity::find()
            .filter(fo_bills::Column::FolioNo.eq(folio_no))
            .one(&self.db)
            .await?
            .ok_or_else(|| BillingError::NoBillForFolio(folio_no.to_string()))?;
        Ok(bill)
    }

    /// Lists all bills, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_bills(&self) -> Result<Vec<fo_bills::Model>, BillingError> {
        let bills = fo_bills::Entity::find()
            .order_by_desc(fo_bills::Column::BillDate)
            .order_by_desc(fo_bills::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(bills)
    }

    /// Lists settlements recorded against a folio's bill.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_settlements(
        &self,
        folio_no: &str,
    ) -> Result<Vec<bill_settlements::Model>, BillingError> {
        let settlements = bill_settlements::Entity::find()
            .filter(bill_settlements::Column::FolioNo.eq(folio_no))
            .order_by_asc(bill_settlements::Column::PaymentDate)
            .order_by_asc(bill_settlements::Column::Id)
            .all(&self.db)
            .await?;
        Ok(settlements)
    }

    async fn find_checkin(&self, folio_no: &str) -> Result<checkins::Model, BillingError> {
        let checkin = checkins::Entity::find()
            .filter(checkins::Column::FolioNo.eq(folio_no))
            .one(&self.db)
            .await?
            .ok_or_else(|| BillingError::FolioNotFound(folio_no.to_string()))?;
        Ok(checkin)
    }

    async fn charge_lines(&self, folio_no: &str) -> Result<Vec<ChargeLine>, BillingError> {
        let charges = post_transactions::Entity::find()
            .filter(post_transactions::Column::FolioNo.eq(folio_no))
            .filter(post_transactions::Column::Status.ne(ChargeStatus::Cancelled))
            .order_by_asc(post_transactions::Column::TransDate)
            .order_by_asc(post_transactions::Column::Id)
            .all(&self.db)
            .await?;

        Ok(charges
            .into_iter()
            .map(|c| ChargeLine {
                id: c.id,
                acc_head: c.acc_head,
                amount: c.amount,
                trans_date: c.trans_date,
                narration: c.narration,
            })
            .collect())
    }

    async fn advance_lines(
        &self,
        folio_no: &str,
        reservation_no: Option<&str>,
    ) -> Result<Vec<AdvanceLine>, BillingError> {
        let mut condition = Condition::any().add(advances::Column::FolioNo.eq(folio_no));
        if let Some(reservation_no) = reservation_no {
            condition = condition.add(advances::Column::ReservationNo.eq(reservation_no));
        }

        let advances = advances::Entity::find()
            .filter(condition)
            .order_by_asc(advances::Column::PaymentDate)
            .order_by_asc(advances::Column::Id)
            .all(&self.db)
            .await?;

        Ok(advances
            .into_iter()
            .map(|a| AdvanceLine {
                id: a.id,
                payment_mode: a.payment_mode,
                amount: a.amount,
                payment_date: a.payment_date,
                folio_no: a.folio_no,
                reservation_no: a.reservation_no,
                remarks: a.remarks,
            })
            .collect())
    }

    async fn settlement_lines(&self, folio_no: &str) -> Result<Vec<SettlementLine>, BillingError> {
        let settlements = self.list_settlements(folio_no).await?;
        Ok(settlements
            .into_iter()
            .map(|s| SettlementLine {
                id: s.id,
                payment_mode: s.payment_mode,
                amount: s.amount,
                payment_date: s.payment_date,
            })
            .collect())
    }
}
