//! Check-in and checkout routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use innkeep_db::repositories::{
    CheckinError, CheckinRepository, CreateCheckinInput, UpdateCheckinInput,
};

/// Creates the checkin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/checkins", get(list_checkins).post(create_checkin))
        .route("/checkins/active", get(list_active))
        .route("/checkins/due-today", get(list_due_today))
        .route("/checkins/from-reservation", post(checkin_from_reservation))
        .route("/checkins/{id}", get(get_checkin).put(update_checkin))
        .route("/checkins/folio/{folio_no}", get(get_by_folio))
        .route("/checkins/folio/{folio_no}/checkout", post(checkout))
}

/// Request body for a walk-up check-in.
#[derive(Debug, Deserialize)]
pub struct CreateCheckinRequest {
    /// Guest name.
    pub guest_name: String,
    /// Contact number.
    pub contact_no: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Arrival date; defaults to today.
    pub check_in_date: Option<NaiveDate>,
    /// Expected departure date.
    pub check_out_date: Option<NaiveDate>,
    /// Room to occupy.
    pub room_no: String,
    /// Nightly rate; defaults to the room's rate.
    pub rate: Option<Decimal>,
    /// Number of guests.
    pub no_of_persons: Option<i32>,
    /// Reservation being honored.
    pub reservation_no: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
}

/// Request body for checking in from a reservation.
#[derive(Debug, Deserialize)]
pub struct CheckinFromReservationRequest {
    /// The reservation to honor.
    pub reservation_no: String,
    /// Room override; defaults to the reservation's selected room.
    pub room_no: Option<String>,
}

/// Request body for updating a checkin.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateCheckinRequest {
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

/// Query parameters for the due list.
#[derive(Debug, Deserialize)]
pub struct DueQuery {
    /// Departure date; defaults to today.
    pub date: Option<NaiveDate>,
}

/// GET `/checkins` - List all checkins.
async fn list_checkins(State(state): State<AppState>) -> impl IntoResponse {
    let repo = CheckinRepository::new((*state.db).clone());

    match repo.list_checkins().await {
        Ok(checkins) => (StatusCode::OK, Json(json!({ "checkins": checkins }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/checkins/active` - In-house guests.
async fn list_active(State(state): State<AppState>) -> impl IntoResponse {
    let repo = CheckinRepository::new((*state.db).clone());

    match repo.list_active().await {
        Ok(checkins) => (StatusCode::OK, Json(json!({ "checkins": checkins }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/checkins/due-today` - Departures expected on a date.
async fn list_due_today(
    State(state): State<AppState>,
    Query(query): Query<DueQuery>,
) -> impl IntoResponse {
    let repo = CheckinRepository::new((*state.db).clone());
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    match repo.list_due_on(date).await {
        Ok(checkins) => {
            (StatusCode::OK, Json(json!({ "date": date, "checkins": checkins }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST `/checkins` - Check a walk-up guest in.
async fn create_checkin(
    State(state): State<AppState>,
    Json(payload): Json<CreateCheckinRequest>,
) -> impl IntoResponse {
    let repo = CheckinRepository::new((*state.db).clone());

    let input = CreateCheckinInput {
        guest_name: payload.guest_name,
        contact_no: payload.contact_no,
        email: payload.email,
        check_in_date: payload
            .check_in_date
            .unwrap_or_else(|| Utc::now().date_naive()),
        check_out_date: payload.check_out_date,
        room_no: payload.room_no,
        rate: payload.rate,
        no_of_persons: payload.no_of_persons,
        reservation_no: payload.reservation_no,
        remarks: payload.remarks,
        user_id: None,
    };

    match repo.create_checkin(input).await {
        Ok(checkin) => {
            info!(folio_no = %checkin.folio_no, room_no = %checkin.room_no, "Guest checked in");
            (StatusCode::CREATED, Json(json!({ "checkin": checkin }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST `/checkins/from-reservation` - Check in from a reservation.
async fn checkin_from_reservation(
    State(state): State<AppState>,
    Json(payload): Json<CheckinFromReservationRequest>,
) -> impl IntoResponse {
    let repo = CheckinRepository::new((*state.db).clone());

    match repo
        .create_from_reservation(&payload.reservation_no, payload.room_no, None)
        .await
    {
        Ok(checkin) => {
            info!(
                folio_no = %checkin.folio_no,
                reservation_no = %payload.reservation_no,
                "Guest checked in from reservation"
            );
            (StatusCode::CREATED, Json(json!({ "checkin": checkin }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/checkins/{id}` - Get a checkin.
async fn get_checkin(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = CheckinRepository::new((*state.db).clone());

    match repo.get_checkin(id).await {
        Ok(checkin) => (StatusCode::OK, Json(json!({ "checkin": checkin }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/checkins/folio/{folio_no}` - Get a checkin by folio number.
async fn get_by_folio(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = CheckinRepository::new((*state.db).clone());

    match repo.get_by_folio_no(&folio_no).await {
        Ok(checkin) => (StatusCode::OK, Json(json!({ "checkin": checkin }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PUT `/checkins/{id}` - Update an in-house checkin.
async fn update_checkin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCheckinRequest>,
) -> impl IntoResponse {
    let repo = CheckinRepository::new((*state.db).clone());

    let input = UpdateCheckinInput {
        guest_name: payload.guest_name,
        contact_no: payload.contact_no,
        email: payload.email,
        check_out_date: payload.check_out_date,
        rate: payload.rate,
        no_of_persons: payload.no_of_persons,
        remarks: payload.remarks,
    };

    match repo.update_checkin(id, input).await {
        Ok(checkin) => (StatusCode::OK, Json(json!({ "checkin": checkin }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/checkins/folio/{folio_no}/checkout` - Check the guest out.
async fn checkout(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = CheckinRepository::new((*state.db).clone());

    match repo.checkout(&folio_no).await {
        Ok(checkin) => {
            info!(folio_no = %checkin.folio_no, "Guest checked out");
            (StatusCode::OK, Json(json!({ "checkin": checkin }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &CheckinError) -> Response {
    match err {
        CheckinError::NotFound(_)
        | CheckinError::FolioNotFound(_)
        | CheckinError::ReservationNotFound(_)
        | CheckinError::RoomNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": err.to_string() })),
        )
            .into_response(),
        CheckinError::RoomNotAvailable(_) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "room_not_available", "message": err.to_string() })),
        )
            .into_response(),
        CheckinError::ReservationAlreadyUsed(_)
        | CheckinError::ReservationCancelled(_)
        | CheckinError::AlreadyCheckedOut(_)
        | CheckinError::NoRoomAssigned(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "invalid_checkin_state", "message": err.to_string() })),
        )
            .into_response(),
        CheckinError::Database(_) => {
            error!(error = %err, "Checkin operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
