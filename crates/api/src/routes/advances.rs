//! Advance payment routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use innkeep_db::repositories::{
    AdvanceError, AdvanceRepository, CreateAdvanceInput, UpdateAdvanceInput,
};

/// Creates the advance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/advances", get(list_advances).post(create_advance))
        .route(
            "/advances/{id}",
            get(get_advance).put(update_advance).delete(delete_advance),
        )
        .route("/advances/folio/{folio_no}", get(list_by_folio))
        .route("/advances/folio/{folio_no}/total", get(total_by_folio))
        .route("/advances/reservation/{reservation_no}", get(list_by_reservation))
        .route(
            "/advances/reservation/{reservation_no}/total",
            get(total_by_reservation),
        )
}

/// Request body for recording an advance.
#[derive(Debug, Deserialize)]
pub struct CreateAdvanceRequest {
    /// Folio reference.
    pub folio_no: Option<String>,
    /// Reservation reference.
    pub reservation_no: Option<String>,
    /// Guest name.
    pub guest_name: String,
    /// Payment mode.
    pub payment_mode: String,
    /// Paid amount.
    pub amount: Decimal,
    /// Payment date; defaults to today.
    pub payment_date: Option<NaiveDate>,
    /// Instrument reference.
    pub reference_no: Option<String>,
    /// Room number.
    pub room_no: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
}

/// Request body for updating an advance.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateAdvanceRequest {
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

impl CreateAdvanceRequest {
    fn into_input(self) -> CreateAdvanceInput {
        CreateAdvanceInput {
            folio_no: self.folio_no,
            reservation_no: self.reservation_no,
            guest_name: self.guest_name,
            payment_mode: self.payment_mode,
            amount: self.amount,
            payment_date: self
                .payment_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            reference_no: self.reference_no,
            room_no: self.room_no,
            remarks: self.remarks,
            user_id: None,
        }
    }
}

/// GET `/advances` - List all advances.
async fn list_advances(State(state): State<AppState>) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo.list_advances().await {
        Ok(advances) => (StatusCode::OK, Json(json!({ "advances": advances }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/advances` - Record an advance against a folio or reservation.
async fn create_advance(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdvanceRequest>,
) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo.create_advance(payload.into_input()).await {
        Ok(advance) => {
            info!(advance_id = advance.id, amount = %advance.amount, "Recorded advance");
            (StatusCode::CREATED, Json(json!({ "advance": advance }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/advances/{id}` - Get an advance.
async fn get_advance(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo.get_advance(id).await {
        Ok(advance) => (StatusCode::OK, Json(json!({ "advance": advance }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/advances/folio/{folio_no}` - Advances referencing a folio.
async fn list_by_folio(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo.find_by_folio(&folio_no).await {
        Ok(advances) => (StatusCode::OK, Json(json!({ "advances": advances }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/advances/folio/{folio_no}/total` - Sum of a folio's advances.
async fn total_by_folio(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo.total_by_folio(&folio_no).await {
        Ok(total) => {
            (StatusCode::OK, Json(json!({ "folio_no": folio_no, "total": total })))
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/advances/reservation/{reservation_no}` - Advances referencing a reservation.
async fn list_by_reservation(
    State(state): State<AppState>,
    Path(reservation_no): Path<String>,
) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo.find_by_reservation(&reservation_no).await {
        Ok(advances) => (StatusCode::OK, Json(json!({ "advances": advances }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/advances/reservation/{reservation_no}/total` - Sum of a reservation's advances.
async fn total_by_reservation(
    State(state): State<AppState>,
    Path(reservation_no): Path<String>,
) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo.total_by_reservation(&reservation_no).await {
        Ok(total) => (
            StatusCode::OK,
            Json(json!({ "reservation_no": reservation_no, "total": total })),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// PUT `/advances/{id}` - Update an advance.
async fn update_advance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAdvanceRequest>,
) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    let input = UpdateAdvanceInput {
        payment_mode: payload.payment_mode,
        amount: payload.amount,
        payment_date: payload.payment_date,
        reference_no: payload.reference_no,
        remarks: payload.remarks,
    };

    match repo.update_advance(id, input).await {
        Ok(advance) => (StatusCode::OK, Json(json!({ "advance": advance }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE `/advances/{id}` - Delete an advance.
async fn delete_advance(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo.delete_advance(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

pub(super) fn error_response(err: &AdvanceError) -> Response {
    match err {
        AdvanceError::NotFound(_)
        | AdvanceError::ReservationNotFound(_)
        | AdvanceError::FolioNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": err.to_string() })),
        )
            .into_response(),
        AdvanceError::MissingReference
        | AdvanceError::InvalidPaymentMode(_)
        | AdvanceError::NonPositiveAmount(_)
        | AdvanceError::UnlinkedReferences { .. }
        | AdvanceError::PaymentBeforeCheckin { .. }
        | AdvanceError::PaymentBeforeArrival { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_advance", "message": err.to_string() })),
        )
            .into_response(),
        AdvanceError::Database(_) => {
            error!(error = %err, "Advance operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
