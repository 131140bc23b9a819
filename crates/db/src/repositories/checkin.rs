//! Checkin repository: folio lifecycle from arrival to checkout.
//!
//! Check-in opens a folio, occupies the room, and ties back to the
//! reservation when one exists. Checkout closes the folio and releases the
//! room for housekeeping.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use innkeep_shared::types::{DocumentKind, DocumentNo};

use crate::entities::{
    checkins, reservations, rooms,
    sea_orm_active_enums::{CheckinStatus, ReservationStatus, RoomStatus},
};

/// Error types for checkin operations.
#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    /// Checkin not found by ID.
    #[error("Checkin not found: {0}")]
    NotFound(i64),

    /// Folio not found.
    #[error("Folio not found: {0}")]
    FolioNotFound(String),

    /// Reservation not found.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// The reservation was already used for a check-in.
    #[error("Reservation {0} is already checked in")]
    ReservationAlreadyUsed(String),

    /// The reservation is cancelled.
    #[error("Reservation {0} is cancelled")]
    ReservationCancelled(String),

    /// Room not found.
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// Reservation check-in attempted with no room to assign.
    #[error("Reservation {0} has no room assigned")]
    NoRoomAssigned(String),

    /// Room is not available for occupancy.
    #[error("Room {0} is not available")]
    RoomNotAvailable(String),

    /// The guest already checked out.
    #[error("Folio {0} is already checked out")]
    AlreadyCheckedOut(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a check-in.
#[derive(Debug, Clone)]
pub struct CreateCheckinInput {
    /// Guest name.
    pub guest_name: String,
    /// Contact number.
    pub contact_no: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Arrival date.
    pub check_in_date: NaiveDate,
    /// Expected departure date.
    pub check_out_date: Option<NaiveDate>,
    /// Room to occupy.
    pub room_no: String,
    /// Nightly rate; falls back to the room's rate when absent.
    pub rate: Option<Decimal>,
    /// Number of guests.
    pub no_of_persons: Option<i32>,
    /// Reservation being honored, if any.
    pub reservation_no: Option<String>,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// User performing the check-in.
    pub user_id: Option<i64>,
}

/// Input for updating a checkin. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCheckinInput {
    /// New guest name.
    pub guest_name: Option<String>,
    /// New contact number.
    pub contact_no: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New expected departure.
    pub check_out_date: Option<NaiveDate>,
    /// New rate.
    pub rate: Option<Decimal>,
    /// New guest count.
    pub no_of_persons: Option<i32>,
    /// New remarks.
    pub remarks: Option<String>,
}

/// Checkin repository for folio operations.
#[derive(Debug, Clone)]
pub struct CheckinRepository {
    db: DatabaseConnection,
}

impl CheckinRepository {
    /// Creates a new checkin repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks a guest in: opens a `FOL/YYYYMM/NNNN` folio, occupies the
    /// room, and marks the reservation as checked in when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is missing or not vacant, the
    /// reservation is missing, used, or cancelled, or the database
    /// operation fails.
    pub async fn create_checkin(
        &self,
        input: CreateCheckinInput,
    ) -> Result<checkins::Model, CheckinError> {
        let txn = self.db.begin().await?;

        let room = rooms::Entity::find()
            .filter(rooms::Column::RoomNo.eq(input.room_no.as_str()))
            .one(&txn)
            .await?
            .ok_or_else(|| CheckinError::RoomNotFound(input.room_no.clone()))?;

        if room.status != RoomStatus::Vacant {
            return Err(CheckinError::RoomNotAvailable(input.room_no.clone()));
        }

        let reservation = match &input.reservation_no {
            Some(reservation_no) => Some(Self::claim_reservation(&txn, reservation_no).await?),
            None => None,
        };

        let folio_no = Self::next_folio_no(&txn, input.check_in_date).await?;
        let now = Utc::now().into();
        let rate = input.rate.unwrap_or(room.rate);

        let checkin = checkins::ActiveModel {
            folio_no: Set(folio_no.as_str().to_string()),
            guest_name: Set(input.guest_name),
            contact_no: Set(input.contact_no),
            email: Set(input.email),
            check_in_date: Set(input.check_in_date),
            check_out_date: Set(input.check_out_date),
            room_no: Set(input.room_no),
            rate: Set(Some(rate)),
            no_of_persons: Set(input.no_of_persons),
            reservation_no: Set(reservation.map(|r| r.reservation_no)),
            status: Set(CheckinStatus::CheckedIn),
            audit_date: Set(input.check_in_date),
            remarks: Set(input.remarks),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = checkin.insert(&txn).await?;

        let mut room_active: rooms::ActiveModel = room.into();
        room_active.status = Set(RoomStatus::Occupied);
        room_active.current_folio = Set(Some(inserted.folio_no.clone()));
        room_active.updated_at = Set(now);
        room_active.update(&txn).await?;

        txn.commit().await?;
        Ok(inserted)
    }

    /// Checks a guest in from their reservation, copying the guest details
    /// across. The room defaults to the reservation's selected room.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is missing, used, cancelled, or
    /// has no room to assign, or the check-in itself fails.
    pub async fn create_from_reservation(
        &self,
        reservation_no: &str,
        room_no: Option<String>,
        user_id: Option<i64>,
    ) -> Result<checkins::Model, CheckinError> {
        let reservation = reservations::Entity::find()
            .filter(reservations::Column::ReservationNo.eq(reservation_no))
            .one(&self.db)
            .await?
            .ok_or_else(|| CheckinError::ReservationNotFound(reservation_no.to_string()))?;

        let room_no = room_no
            .or_else(|| reservation.selected_room.clone())
            .ok_or_else(|| CheckinError::NoRoomAssigned(reservation_no.to_string()))?;

        self.create_checkin(CreateCheckinInput {
            guest_name: reservation.guest_name,
            contact_no: reservation.contact_no,
            email: reservation.email,
            check_in_date: Utc::now().date_naive(),
            check_out_date: Some(reservation.to_date),
            room_no,
            rate: reservation.rate,
            no_of_persons: reservation.total_pax,
            reservation_no: Some(reservation.reservation_no),
            remarks: reservation.remarks,
            user_id,
        })
        .await
    }

    /// Validates and marks a reservation as checked in.
    async fn claim_reservation(
        txn: &DatabaseTransaction,
        reservation_no: &str,
    ) -> Result<reservations::Model, CheckinError> {
        let reservation = reservations::Entity::find()
            .filter(reservations::Column::ReservationNo.eq(reservation_no))
            .one(txn)
            .await?
            .ok_or_else(|| CheckinError::ReservationNotFound(reservation_no.to_string()))?;

        match reservation.status {
            ReservationStatus::CheckedIn => {
                return Err(CheckinError::ReservationAlreadyUsed(
                    reservation_no.to_string(),
                ));
            }
            ReservationStatus::Cancelled => {
                return Err(CheckinError::ReservationCancelled(
                    reservation_no.to_string(),
                ));
            }
            ReservationStatus::Booked => {}
        }

        let model = reservation.clone();
        let mut active: reservations::ActiveModel = reservation.into();
        active.status = Set(ReservationStatus::CheckedIn);
        active.is_checkin_done = Set(true);
        active.updated_at = Set(Utc::now().into());
        active.update(txn).await?;

        Ok(model)
    }

    /// Formats the next folio number for the given month.
    async fn next_folio_no(
        txn: &DatabaseTransaction,
        date: NaiveDate,
    ) -> Result<DocumentNo, CheckinError> {
        let prefix = DocumentNo::month_prefix(DocumentKind::Folio, date);
        let existing = checkins::Entity::find()
            .filter(checkins::Column::FolioNo.starts_with(&prefix))
            .count(txn)
            .await?;
        Ok(DocumentNo::next_in_month(DocumentKind::Folio, date, existing))
    }

    /// Gets a checkin by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkin is not found or the query fails.
    pub async fn get_checkin(&self, id: i64) -> Result<checkins::Model, CheckinError> {
        let checkin = checkins::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CheckinError::NotFound(id))?;
        Ok(checkin)
    }

    /// Gets a checkin by its folio number.
    ///
    /// # Errors
    ///
    /// Returns an error if the folio is not found or the query fails.
    pub async fn get_by_folio_no(&self, folio_no: &str) -> Result<checkins::Model, CheckinError> {
        let checkin = checkins::Entity::find()
            .filter(checkins::Column::FolioNo.eq(folio_no))
            .one(&self.db)
            .await?
            .ok_or_else(|| CheckinError::FolioNotFound(folio_no.to_string()))?;
        Ok(checkin)
    }

    /// Lists all checkins, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_checkins(&self) -> Result<Vec<checkins::Model>, CheckinError> {
        let checkins = checkins::Entity::find()
            .order_by_desc(checkins::Column::CheckInDate)
            .order_by_desc(checkins::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(checkins)
    }

    /// Lists in-house guests (folios not yet checked out).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<checkins::Model>, CheckinError> {
        let checkins = checkins::Entity::find()
            .filter(checkins::Column::Status.eq(CheckinStatus::CheckedIn))
            .order_by_asc(checkins::Column::RoomNo)
            .all(&self.db)
            .await?;
        Ok(checkins)
    }

    /// Lists in-house guests whose expected departure is the given date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_due_on(&self, date: NaiveDate) -> Result<Vec<checkins::Model>, CheckinError> {
        let checkins = checkins::Entity::find()
            .filter(checkins::Column::Status.eq(CheckinStatus::CheckedIn))
            .filter(checkins::Column::CheckOutDate.eq(date))
            .order_by_asc(checkins::Column::RoomNo)
            .all(&self.db)
            .await?;
        Ok(checkins)
    }

    /// Updates an in-house checkin.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkin is not found, already checked out,
    /// or the database operation fails.
    pub async fn update_checkin(
        &self,
        id: i64,
        input: UpdateCheckinInput,
    ) -> Result<checkins::Model, CheckinError> {
        let checkin = self.get_checkin(id).await?;

        if checkin.status == CheckinStatus::CheckedOut {
            return Err(CheckinError::AlreadyCheckedOut(checkin.folio_no));
        }

        let mut active: checkins::ActiveModel = checkin.into();

        if let Some(guest_name) = input.guest_name {
            active.guest_name = Set(guest_name);
        }
        if let Some(contact_no) = input.contact_no {
            active.contact_no = Set(Some(contact_no));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(check_out_date) = input.check_out_date {
            active.check_out_date = Set(Some(check_out_date));
        }
        if let Some(rate) = input.rate {
            active.rate = Set(Some(rate));
        }
        if let Some(no_of_persons) = input.no_of_persons {
            active.no_of_persons = Set(Some(no_of_persons));
        }
        if let Some(remarks) = input.remarks {
            active.remarks = Set(Some(remarks));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Checks a guest out: closes the folio and releases the room to
    /// housekeeping (status `dirty`).
    ///
    /// # Errors
    ///
    /// Returns an error if the folio is not found, already checked out, or
    /// the database operation fails.
    pub async fn checkout(&self, folio_no: &str) -> Result<checkins::Model, CheckinError> {
        let txn = self.db.begin().await?;

        let checkin = checkins::Entity::find()
            .filter(checkins::Column::FolioNo.eq(folio_no))
            .one(&txn)
            .await?
            .ok_or_else(|| CheckinError::FolioNotFound(folio_no.to_string()))?;

        if checkin.status == CheckinStatus::CheckedOut {
            return Err(CheckinError::AlreadyCheckedOut(checkin.folio_no));
        }

        let now = Utc::now();
        let room_no = checkin.room_no.clone();

        let mut active: checkins::ActiveModel = checkin.into();
        active.status = Set(CheckinStatus::CheckedOut);
        active.check_out_date = Set(Some(now.date_naive()));
        active.updated_at = Set(now.into());
        let updated = active.update(&txn).await?;

        if let Some(room) = rooms::Entity::find()
            .filter(rooms::Column::RoomNo.eq(room_no))
            .one(&txn)
            .await?
        {
            let mut room_active: rooms::ActiveModel = room.into();
            room_active.status = Set(RoomStatus::Dirty);
            room_active.current_folio = Set(None);
            room_active.updated_at = Set(now.into());
            room_active.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(updated)
    }
}
