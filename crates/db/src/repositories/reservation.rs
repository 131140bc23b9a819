//! Reservation repository for booking database operations.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use innkeep_shared::types::{DocumentKind, DocumentNo, PageRequest, PageResponse};

use crate::entities::{reservations, sea_orm_active_enums::ReservationStatus};

/// Error types for reservation operations.
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    /// Reservation not found by ID.
    #[error("Reservation not found: {0}")]
    NotFound(i64),

    /// Reservation not found by number.
    #[error("Reservation not found: {0}")]
    NotFoundByNo(String),

    /// The guest has already checked in against this reservation.
    #[error("Reservation {0} is already checked in")]
    AlreadyCheckedIn(String),

    /// The reservation was cancelled earlier.
    #[error("Reservation {0} is cancelled")]
    Cancelled(String),

    /// Stay dates are inverted or empty.
    #[error("Invalid stay: from {from} to {to}")]
    InvalidStayDates {
        /// Arrival date.
        from: NaiveDate,
        /// Departure date.
        to: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a reservation.
#[derive(Debug, Clone)]
pub struct CreateReservationInput {
    /// Guest name.
    pub guest_name: String,
    /// Contact number.
    pub contact_no: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Arrival date.
    pub from_date: NaiveDate,
    /// Departure date.
    pub to_date: NaiveDate,
    /// Number of rooms booked.
    pub no_of_rooms: i32,
    /// Total guests.
    pub total_pax: Option<i32>,
    /// Quoted nightly rate.
    pub rate: Option<Decimal>,
    /// Tax amount.
    pub tax: Option<Decimal>,
    /// Whether the rate already includes tax.
    pub is_tax_inclusive: bool,
    /// Quoted total for the stay.
    pub total_amount: Option<Decimal>,
    /// Pre-assigned room, if any.
    pub selected_room: Option<String>,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// User who took the booking.
    pub user_id: Option<i64>,
}

/// Input for updating a reservation. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateReservationInput {
    /// New guest name.
    pub guest_name: Option<String>,
    /// New contact number.
    pub contact_no: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New arrival date.
    pub from_date: Option<NaiveDate>,
    /// New departure date.
    pub to_date: Option<NaiveDate>,
    /// New room count.
    pub no_of_rooms: Option<i32>,
    /// New guest count.
    pub total_pax: Option<i32>,
    /// New rate.
    pub rate: Option<Decimal>,
    /// New tax.
    pub tax: Option<Decimal>,
    /// New total.
    pub total_amount: Option<Decimal>,
    /// New room assignment.
    pub selected_room: Option<String>,
    /// New remarks.
    pub remarks: Option<String>,
}

/// Filter options for listing reservations.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    /// Filter by status.
    pub status: Option<ReservationStatus>,
    /// Arrivals on or after this date.
    pub from_date: Option<NaiveDate>,
    /// Arrivals on or before this date.
    pub to_date: Option<NaiveDate>,
    /// Case-sensitive guest name substring.
    pub guest_name: Option<String>,
}

/// Reservation repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    db: DatabaseConnection,
}

impl ReservationRepository {
    /// Creates a new reservation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a reservation with a fresh `RES/YYYYMM/NNNN` number.
    ///
    /// # Errors
    ///
    /// Returns an error if the stay dates are inverted or the database
    /// operation fails.
    pub async fn create_reservation(
        &self,
        input: CreateReservationInput,
    ) -> Result<reservations::Model, ReservationError> {
        if input.to_date < input.from_date {
            return Err(ReservationError::InvalidStayDates {
                from: input.from_date,
                to: input.to_date,
            });
        }

        let today = Utc::now().date_naive();
        let reservation_no = self.next_reservation_no(today).await?;
        let now = Utc::now().into();

        let reservation = reservations::ActiveModel {
            reservation_no: Set(reservation_no.into_inner()),
            guest_name: Set(input.guest_name),
            contact_no: Set(input.contact_no),
            email: Set(input.email),
            from_date: Set(input.from_date),
            to_date: Set(input.to_date),
            no_of_rooms: Set(input.no_of_rooms),
            total_pax: Set(input.total_pax),
            rate: Set(input.rate),
            tax: Set(input.tax),
            is_tax_inclusive: Set(input.is_tax_inclusive),
            total_amount: Set(input.total_amount),
            selected_room: Set(input.selected_room),
            status: Set(ReservationStatus::Booked),
            is_checkin_done: Set(false),
            remarks: Set(input.remarks),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = reservation.insert(&self.db).await?;
        Ok(result)
    }

    /// Formats the next reservation number for the given month.
    async fn next_reservation_no(&self, date: NaiveDate) -> Result<DocumentNo, ReservationError> {
        let prefix = DocumentNo::month_prefix(DocumentKind::Reservation, date);
        let existing = reservations::Entity::find()
            .filter(reservations::Column::ReservationNo.starts_with(&prefix))
            .count(&self.db)
            .await?;
        Ok(DocumentNo::next_in_month(
            DocumentKind::Reservation,
            date,
            existing,
        ))
    }

    /// Gets a reservation by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is not found or the query fails.
    pub async fn get_reservation(&self, id: i64) -> Result<reservations::Model, ReservationError> {
        let reservation = reservations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ReservationError::NotFound(id))?;
        Ok(reservation)
    }

    /// Gets a reservation by its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is not found or the query fails.
    pub async fn get_by_reservation_no(
        &self,
        reservation_no: &str,
    ) -> Result<reservations::Model, ReservationError> {
        let reservation = reservations::Entity::find()
            .filter(reservations::Column::ReservationNo.eq(reservation_no))
            .one(&self.db)
            .await?
            .ok_or_else(|| ReservationError::NotFoundByNo(reservation_no.to_string()))?;
        Ok(reservation)
    }

    /// Lists a page of reservations with optional filters, newest arrivals
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_reservations(
        &self,
        filter: ReservationFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<reservations::Model>, ReservationError> {
        let mut query = reservations::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(reservations::Column::Status.eq(status));
        }

        if let Some(from_date) = filter.from_date {
            query = query.filter(reservations::Column::FromDate.gte(from_date));
        }

        if let Some(to_date) = filter.to_date {
            query = query.filter(reservations::Column::FromDate.lte(to_date));
        }

        if let Some(guest_name) = filter.guest_name {
            query = query.filter(reservations::Column::GuestName.contains(&guest_name));
        }

        let total = query.clone().count(&self.db).await?;

        let reservations = query
            .order_by_desc(reservations::Column::FromDate)
            .order_by_desc(reservations::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            reservations,
            page.page,
            page.per_page,
            total,
        ))
    }

    /// Lists reservations arriving on the given date that have not yet
    /// checked in.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_arrivals(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<reservations::Model>, ReservationError> {
        let reservations = reservations::Entity::find()
            .filter(reservations::Column::FromDate.eq(date))
            .filter(reservations::Column::Status.eq(ReservationStatus::Booked))
            .order_by_asc(reservations::Column::GuestName)
            .all(&self.db)
            .await?;
        Ok(reservations)
    }

    /// Updates a booked reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is not found, already checked in,
    /// cancelled, or the database operation fails.
    pub async fn update_reservation(
        &self,
        id: i64,
        input: UpdateReservationInput,
    ) -> Result<reservations::Model, ReservationError> {
        let reservation = self.get_reservation(id).await?;

        match reservation.status {
            ReservationStatus::CheckedIn => {
                return Err(ReservationError::AlreadyCheckedIn(
                    reservation.reservation_no,
                ));
            }
            ReservationStatus::Cancelled => {
                return Err(ReservationError::Cancelled(reservation.reservation_no));
            }
            ReservationStatus::Booked => {}
        }

        let mut active: reservations::ActiveModel = reservation.into();

        if let Some(guest_name) = input.guest_name {
            active.guest_name = Set(guest_name);
        }
        if let Some(contact_no) = input.contact_no {
            active.contact_no = Set(Some(contact_no));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(from_date) = input.from_date {
            active.from_date = Set(from_date);
        }
        if let Some(to_date) = input.to_date {
            active.to_date = Set(to_date);
        }
        if let Some(no_of_rooms) = input.no_of_rooms {
            active.no_of_rooms = Set(no_of_rooms);
        }
        if let Some(total_pax) = input.total_pax {
            active.total_pax = Set(Some(total_pax));
        }
        if let Some(rate) = input.rate {
            active.rate = Set(Some(rate));
        }
        if let Some(tax) = input.tax {
            active.tax = Set(Some(tax));
        }
        if let Some(total_amount) = input.total_amount {
            active.total_amount = Set(Some(total_amount));
        }
        if let Some(selected_room) = input.selected_room {
            active.selected_room = Set(Some(selected_room));
        }
        if let Some(remarks) = input.remarks {
            active.remarks = Set(Some(remarks));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Cancels a booked reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is not found, already checked in,
    /// or the database operation fails.
    pub async fn cancel_reservation(&self, id: i64) -> Result<reservations::Model, ReservationError> {
        let reservation = self.get_reservation(id).await?;

        if reservation.status == ReservationStatus::CheckedIn {
            return Err(ReservationError::AlreadyCheckedIn(
                reservation.reservation_no,
            ));
        }

        let mut active: reservations::ActiveModel = reservation.into();
        active.status = Set(ReservationStatus::Cancelled);
        active.updated_at = Set(Utc::now().into());

        let cancelled = active.update(&self.db).await?;
        Ok(cancelled)
    }
}
