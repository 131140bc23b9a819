//! Reservation management routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use innkeep_db::entities::sea_orm_active_enums::ReservationStatus;
use innkeep_shared::types::PageRequest;
use innkeep_db::repositories::{
    CreateReservationInput, ReservationError, ReservationFilter, ReservationRepository,
    UpdateReservationInput,
};

/// Creates the reservation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list_reservations).post(create_reservation))
        .route("/reservations/arrivals", get(list_arrivals))
        .route("/reservations/{id}", get(get_reservation).put(update_reservation))
        .route("/reservations/{id}/cancel", post(cancel_reservation))
        .route("/reservations/no/{reservation_no}", get(get_by_number))
}

/// Query parameters for listing reservations.
#[derive(Debug, Deserialize)]
pub struct ListReservationsQuery {
    /// Filter by status.
    pub status: Option<ReservationStatus>,
    /// Arrivals on or after this date (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Arrivals on or before this date (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Guest name substring.
    pub guest: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Query parameters for the arrivals list.
#[derive(Debug, Deserialize)]
pub struct ArrivalsQuery {
    /// Arrival date; defaults to today.
    pub date: Option<NaiveDate>,
}

/// Request body for creating a reservation.
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
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
    /// Number of rooms; defaults to 1.
    pub no_of_rooms: Option<i32>,
    /// Total guests.
    pub total_pax: Option<i32>,
    /// Quoted nightly rate.
    pub rate: Option<Decimal>,
    /// Tax amount.
    pub tax: Option<Decimal>,
    /// Whether the rate includes tax.
    #[serde(default)]
    pub is_tax_inclusive: bool,
    /// Quoted total for the stay.
    pub total_amount: Option<Decimal>,
    /// Pre-assigned room.
    pub selected_room: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
}

/// Request body for updating a reservation.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateReservationRequest {
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

/// GET `/reservations` - List reservations with filters.
async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ListReservationsQuery>,
) -> impl IntoResponse {
    let repo = ReservationRepository::new((*state.db).clone());

    let filter = ReservationFilter {
        status: query.status,
        from_date: query.from,
        to_date: query.to,
        guest_name: query.guest,
    };

    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };

    match repo.list_reservations(filter, &page).await {
        Ok(page) => (
            StatusCode::OK,
            Json(json!({ "reservations": page.data, "meta": page.meta })),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/reservations/arrivals` - Booked guests arriving on a date.
async fn list_arrivals(
    State(state): State<AppState>,
    Query(query): Query<ArrivalsQuery>,
) -> impl IntoResponse {
    let repo = ReservationRepository::new((*state.db).clone());
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    match repo.list_arrivals(date).await {
        Ok(reservations) => {
            (StatusCode::OK, Json(json!({ "date": date, "arrivals": reservations })))
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST `/reservations` - Create a reservation.
async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> impl IntoResponse {
    let repo = ReservationRepository::new((*state.db).clone());

    let input = CreateReservationInput {
        guest_name: payload.guest_name,
        contact_no: payload.contact_no,
        email: payload.email,
        from_date: payload.from_date,
        to_date: payload.to_date,
        no_of_rooms: payload.no_of_rooms.unwrap_or(1),
        total_pax: payload.total_pax,
        rate: payload.rate,
        tax: payload.tax,
        is_tax_inclusive: payload.is_tax_inclusive,
        total_amount: payload.total_amount,
        selected_room: payload.selected_room,
        remarks: payload.remarks,
        user_id: None,
    };

    match repo.create_reservation(input).await {
        Ok(reservation) => {
            info!(reservation_no = %reservation.reservation_no, "Created reservation");
            (StatusCode::CREATED, Json(json!({ "reservation": reservation }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/reservations/{id}` - Get a reservation.
async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let repo = ReservationRepository::new((*state.db).clone());

    match repo.get_reservation(id).await {
        Ok(reservation) => {
            (StatusCode::OK, Json(json!({ "reservation": reservation }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/reservations/no/{reservation_no}` - Get a reservation by number.
async fn get_by_number(
    State(state): State<AppState>,
    Path(reservation_no): Path<String>,
) -> impl IntoResponse {
    let repo = ReservationRepository::new((*state.db).clone());

    match repo.get_by_reservation_no(&reservation_no).await {
        Ok(reservation) => {
            (StatusCode::OK, Json(json!({ "reservation": reservation }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// PUT `/reservations/{id}` - Update a booked reservation.
async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReservationRequest>,
) -> impl IntoResponse {
    let repo = ReservationRepository::new((*state.db).clone());

    let input = UpdateReservationInput {
        guest_name: payload.guest_name,
        contact_no: payload.contact_no,
        email: payload.email,
        from_date: payload.from_date,
        to_date: payload.to_date,
        no_of_rooms: payload.no_of_rooms,
        total_pax: payload.total_pax,
        rate: payload.rate,
        tax: payload.tax,
        total_amount: payload.total_amount,
        selected_room: payload.selected_room,
        remarks: payload.remarks,
    };

    match repo.update_reservation(id, input).await {
        Ok(reservation) => {
            (StatusCode::OK, Json(json!({ "reservation": reservation }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST `/reservations/{id}/cancel` - Cancel a booked reservation.
async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let repo = ReservationRepository::new((*state.db).clone());

    match repo.cancel_reservation(id).await {
        Ok(reservation) => {
            info!(reservation_no = %reservation.reservation_no, "Cancelled reservation");
            (StatusCode::OK, Json(json!({ "reservation": reservation }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &ReservationError) -> Response {
    match err {
        ReservationError::NotFound(_) | ReservationError::NotFoundByNo(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "reservation_not_found", "message": err.to_string() })),
        )
            .into_response(),
        ReservationError::AlreadyCheckedIn(_) | ReservationError::Cancelled(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "invalid_reservation_state", "message": err.to_string() })),
        )
            .into_response(),
        ReservationError::InvalidStayDates { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_stay_dates", "message": err.to_string() })),
        )
            .into_response(),
        ReservationError::Database(_) => {
            error!(error = %err, "Reservation operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
