//! Advance repository for advance payment operations.
//!
//! Advances arrive through three doors: against a reservation before
//! check-in, against a folio during the stay, or against an ad hoc walk-in
//! folio. The references stored on each row are what later classifies it.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use innkeep_core::payment::{InvalidPaymentMode, PaymentMode};
use innkeep_shared::types::DocumentNo;

use crate::entities::{advances, checkins, reservations};

/// Error types for advance operations.
#[derive(Debug, thiserror::Error)]
pub enum AdvanceError {
    /// Advance not found.
    #[error("Advance not found: {0}")]
    NotFound(i64),

    /// Neither a folio nor a reservation reference was supplied.
    #[error("Advance must reference a folio or a reservation")]
    MissingReference,

    /// Unknown payment mode.
    #[error(transparent)]
    InvalidPaymentMode(#[from] InvalidPaymentMode),

    /// Reservation not found.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// Folio not found.
    #[error("Folio not found: {0}")]
    FolioNotFound(String),

    /// Folio and reservation references that belong to different stays.
    #[error("Folio {folio_no} is not linked to reservation {reservation_no}")]
    UnlinkedReferences {
        /// Folio reference.
        folio_no: String,
        /// Reservation reference.
        reservation_no: String,
    },

    /// Payment dated before the check-in it pays against.
    #[error("Payment date {payment_date} is before check-in date {check_in_date}")]
    PaymentBeforeCheckin {
        /// Payment date.
        payment_date: NaiveDate,
        /// Check-in date of the folio.
        check_in_date: NaiveDate,
    },

    /// Payment dated before the reservation arrival.
    #[error("Payment date {payment_date} is before arrival date {from_date}")]
    PaymentBeforeArrival {
        /// Payment date.
        payment_date: NaiveDate,
        /// Arrival date of the reservation.
        from_date: NaiveDate,
    },

    /// Amount must be positive.
    #[error("Advance amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording an advance payment.
#[derive(Debug, Clone)]
pub struct CreateAdvanceInput {
    /// Folio reference, when the guest is in-house.
    pub folio_no: Option<String>,
    /// Reservation reference, when the guest booked ahead.
    pub reservation_no: Option<String>,
    /// Guest name.
    pub guest_name: String,
    /// Payment mode, in any accepted spelling.
    pub payment_mode: String,
    /// Paid amount.
    pub amount: Decimal,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Instrument reference (card slip, UTR, cheque number).
    pub reference_no: Option<String>,
    /// Room number, informational.
    pub room_no: Option<String>,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// User who took the payment.
    pub user_id: Option<i64>,
}

/// Input for updating an advance. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAdvanceInput {
    /// New payment mode.
    pub payment_mode: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New payment date.
    pub payment_date: Option<NaiveDate>,
    /// New instrument reference.
    pub reference_no: Option<String>,
    /// New remarks.
    pub remarks: Option<String>,
}

/// Advance repository for payment intake.
#[derive(Debug, Clone)]
pub struct AdvanceRepository {
    db: DatabaseConnection,
}

impl AdvanceRepository {
    /// Creates a new advance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an advance. At least one of folio/reservation must be set
    /// and must exist; a folio/reservation pair must belong to the same
    /// stay, and the payment may not be dated before it. Guest name and
    /// room number are filled in from the stay when left blank, and the
    /// payment mode is normalized to its canonical label.
    ///
    /// # Errors
    ///
    /// Returns an error if a reference is missing, unknown, or unlinked,
    /// the amount is not positive, the payment mode is unknown, the
    /// payment date precedes the stay, or the database operation fails.
    pub async fn create_advance(
        &self,
        mut input: CreateAdvanceInput,
    ) -> Result<advances::Model, AdvanceError> {
        if input.folio_no.is_none() && input.reservation_no.is_none() {
            return Err(AdvanceError::MissingReference);
        }
        if input.amount <= Decimal::ZERO {
            return Err(AdvanceError::NonPositiveAmount(input.amount));
        }
        let mode = PaymentMode::parse(&input.payment_mode)?;

        if let Some(folio_no) = input.folio_no.clone() {
            let checkin = checkins::Entity::find()
                .filter(checkins::Column::FolioNo.eq(folio_no.as_str()))
                .one(&self.db)
                .await?
                .ok_or_else(|| AdvanceError::FolioNotFound(folio_no.clone()))?;

            if input.payment_date < checkin.check_in_date {
                return Err(AdvanceError::PaymentBeforeCheckin {
                    payment_date: input.payment_date,
                    check_in_date: checkin.check_in_date,
                });
            }
            if let Some(reservation_no) = &input.reservation_no {
                if checkin.reservation_no.as_deref() != Some(reservation_no.as_str()) {
                    return Err(AdvanceError::UnlinkedReferences {
                        folio_no,
                        reservation_no: reservation_no.clone(),
                    });
                }
            }
            if input.guest_name.is_empty() {
                input.guest_name = checkin.guest_name;
            }
            if input.room_no.is_none() {
                input.room_no = Some(checkin.room_no);
            }
        }

        if let Some(reservation_no) = input.reservation_no.clone() {
            let reservation = reservations::Entity::find()
                .filter(reservations::Column::ReservationNo.eq(reservation_no.as_str()))
                .one(&self.db)
                .await?
                .ok_or(AdvanceError::ReservationNotFound(reservation_no))?;

            if input.payment_date < reservation.from_date {
                return Err(AdvanceError::PaymentBeforeArrival {
                    payment_date: input.payment_date,
                    from_date: reservation.from_date,
                });
            }
            if input.guest_name.is_empty() {
                input.guest_name = reservation.guest_name;
            }
        }

        self.insert_advance(input, mode).await
    }

    /// Records a pre-check-in advance against a reservation. The row
    /// carries only the reservation reference; it attaches to a folio when
    /// the guest checks in.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist or the advance
    /// itself is invalid.
    pub async fn create_pre_checkin(
        &self,
        reservation_no: &str,
        mut input: CreateAdvanceInput,
    ) -> Result<advances::Model, AdvanceError> {
        input.folio_no = None;
        input.reservation_no = Some(reservation_no.to_string());
        self.create_advance(input).await
    }

    /// Records a post-check-in advance against a folio, carrying both
    /// references when the folio came from a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the folio does not exist or the advance itself
    /// is invalid.
    pub async fn create_post_checkin(
        &self,
        folio_no: &str,
        mut input: CreateAdvanceInput,
    ) -> Result<advances::Model, AdvanceError> {
        let checkin = checkins::Entity::find()
            .filter(checkins::Column::FolioNo.eq(folio_no))
            .one(&self.db)
            .await?
            .ok_or_else(|| AdvanceError::FolioNotFound(folio_no.to_string()))?;

        input.folio_no = Some(checkin.folio_no);
        input.reservation_no = checkin.reservation_no;
        self.create_advance(input).await
    }

    /// Records a walk-in advance under a fresh ad hoc `WI<epoch-millis>`
    /// folio, with no reservation reference. The minted folio has no
    /// checkin row yet, so only the amount and mode are checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive, the payment mode is
    /// unknown, or the database operation fails.
    pub async fn create_walk_in(
        &self,
        mut input: CreateAdvanceInput,
    ) -> Result<advances::Model, AdvanceError> {
        if input.amount <= Decimal::ZERO {
            return Err(AdvanceError::NonPositiveAmount(input.amount));
        }
        let mode = PaymentMode::parse(&input.payment_mode)?;

        let folio = DocumentNo::walk_in_folio(Utc::now());
        input.folio_no = Some(folio.into_inner());
        input.reservation_no = None;
        self.insert_advance(input, mode).await
    }

    /// Writes the row. Reference checks happen in the callers.
    async fn insert_advance(
        &self,
        input: CreateAdvanceInput,
        mode: PaymentMode,
    ) -> Result<advances::Model, AdvanceError> {
        let now = Utc::now().into();

        let advance = advances::ActiveModel {
            folio_no: Set(input.folio_no),
            reservation_no: Set(input.reservation_no),
            guest_name: Set(input.guest_name),
            payment_mode: Set(mode.label().to_string()),
            amount: Set(input.amount),
            payment_date: Set(input.payment_date),
            reference_no: Set(input.reference_no),
            room_no: Set(input.room_no),
            remarks: Set(input.remarks),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = advance.insert(&self.db).await?;
        Ok(result)
    }

    /// Checks a payment date against the stay it pays for. Walk-in folios
    /// have no checkin row behind them and pass through.
    async fn validate_payment_date(
        &self,
        folio_no: Option<&str>,
        reservation_no: Option<&str>,
        payment_date: NaiveDate,
    ) -> Result<(), AdvanceError> {
        if let Some(folio_no) = folio_no {
            let checkin = checkins::Entity::find()
                .filter(checkins::Column::FolioNo.eq(folio_no))
                .one(&self.db)
                .await?;
            if let Some(checkin) = checkin {
                if payment_date < checkin.check_in_date {
                    return Err(AdvanceError::PaymentBeforeCheckin {
                        payment_date,
                        check_in_date: checkin.check_in_date,
                    });
                }
            }
        }

        if let Some(reservation_no) = reservation_no {
            let reservation = reservations::Entity::find()
                .filter(reservations::Column::ReservationNo.eq(reservation_no))
                .one(&self.db)
                .await?;
            if let Some(reservation) = reservation {
                if payment_date < reservation.from_date {
                    return Err(AdvanceError::PaymentBeforeArrival {
                        payment_date,
                        from_date: reservation.from_date,
                    });
                }
            }
        }

        Ok(())
    }

    /// Gets an advance by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the advance is not found or the query fails.
    pub async fn get_advance(&self, id: i64) -> Result<advances::Model, AdvanceError> {
        let advance = advances::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AdvanceError::NotFound(id))?;
        Ok(advance)
    }

    /// Lists all advances, newest payment first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_advances(&self) -> Result<Vec<advances::Model>, AdvanceError> {
        let advances = advances::Entity::find()
            .order_by_desc(advances::Column::PaymentDate)
            .order_by_desc(advances::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(advances)
    }

    /// Lists advances referencing a folio.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_folio(&self, folio_no: &str) -> Result<Vec<advances::Model>, AdvanceError> {
        let advances = advances::Entity::find()
            .filter(advances::Column::FolioNo.eq(folio_no))
            .order_by_asc(advances::Column::PaymentDate)
            .all(&self.db)
            .await?;
        Ok(advances)
    }

    /// Lists advances referencing a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_reservation(
        &self,
        reservation_no: &str,
    ) -> Result<Vec<advances::Model>, AdvanceError> {
        let advances = advances::Entity::find()
            .filter(advances::Column::ReservationNo.eq(reservation_no))
            .order_by_asc(advances::Column::PaymentDate)
            .all(&self.db)
            .await?;
        Ok(advances)
    }

    /// Lists every advance belonging to a guest stay: rows that reference
    /// the folio directly plus rows that reference its originating
    /// reservation (paid before check-in).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_for_stay(
        &self,
        folio_no: &str,
        reservation_no: Option<&str>,
    ) -> Result<Vec<advances::Model>, AdvanceError> {
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
        Ok(advances)
    }

    /// Sums advances referencing a folio.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn total_by_folio(&self, folio_no: &str) -> Result<Decimal, AdvanceError> {
        let advances = self.find_by_folio(folio_no).await?;
        Ok(advances.iter().map(|a| a.amount).sum())
    }

    /// Sums advances referencing a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn total_by_reservation(&self, reservation_no: &str) -> Result<Decimal, AdvanceError> {
        let advances = self.find_by_reservation(reservation_no).await?;
        Ok(advances.iter().map(|a| a.amount).sum())
    }

    /// Updates an advance.
    ///
    /// # Errors
    ///
    /// Returns an error if the advance is not found, the new mode, amount,
    /// or payment date is invalid, or the database operation fails.
    pub async fn update_advance(
        &self,
        id: i64,
        input: UpdateAdvanceInput,
    ) -> Result<advances::Model, AdvanceError> {
        let advance = self.get_advance(id).await?;

        if let Some(payment_date) = input.payment_date {
            self.validate_payment_date(
                advance.folio_no.as_deref(),
                advance.reservation_no.as_deref(),
                payment_date,
            )
            .await?;
        }

        let mut active: advances::ActiveModel = advance.into();

        if let Some(payment_mode) = input.payment_mode {
            let mode = PaymentMode::parse(&payment_mode)?;
            active.payment_mode = Set(mode.label().to_string());
        }
        if let Some(amount) = input.amount {
            if amount <= Decimal::ZERO {
                return Err(AdvanceError::NonPositiveAmount(amount));
            }
            active.amount = Set(amount);
        }
        if let Some(payment_date) = input.payment_date {
            active.payment_date = Set(payment_date);
        }
        if let Some(reference_no) = input.reference_no {
            active.reference_no = Set(Some(reference_no));
        }
        if let Some(remarks) = input.remarks {
            active.remarks = Set(Some(remarks));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes an advance.
    ///
    /// # Errors
    ///
    /// Returns an error if the advance is not found or the database
    /// operation fails.
    pub async fn delete_advance(&self, id: i64) -> Result<(), AdvanceError> {
        let advance = self.get_advance(id).await?;
        advance.delete(&self.db).await?;
        Ok(())
    }
}
