//! Final bill and settlement routes.

use axum::{
    extract::{Path, State},
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
use innkeep_db::repositories::{BillingError, BillingRepository, CreateSettlementInput};

/// Creates the billing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/billing/bills", get(list_bills))
        .route("/billing/bills/{id}", get(get_bill))
        .route("/billing/settlements", post(create_settlement))
        .route("/billing/folio/{folio_no}/bill", get(get_bill_by_folio))
        .route("/billing/folio/{folio_no}/final-bill", post(generate_final_bill))
        .route("/billing/folio/{folio_no}/settlements", get(list_settlements))
        .route("/billing/folio/{folio_no}/summary", get(folio_summary))
        .route("/billing/folio/{folio_no}/journey", get(guest_journey))
}

/// Request body for generating a final bill.
#[derive(Debug, Deserialize, Default)]
pub struct GenerateBillRequest {
    /// Remarks carried onto the bill.
    pub remarks: Option<String>,
}

/// Request body for settling a bill.
#[derive(Debug, Deserialize)]
pub struct CreateSettlementRequest {
    /// Folio whose bill is being settled.
    pub folio_no: String,
    /// Payment mode.
    pub payment_mode: String,
    /// Settled amount.
    pub amount: Decimal,
    /// Settlement date; defaults to today.
    pub payment_date: Option<NaiveDate>,
    /// Instrument reference.
    pub reference_no: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
}

/// GET `/billing/bills` - List all generated bills.
async fn list_bills(State(state): State<AppState>) -> impl IntoResponse {
    let repo = BillingRepository::new((*state.db).clone());

    match repo.list_bills().await {
        Ok(bills) => (StatusCode::OK, Json(json!({ "bills": bills }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/billing/bills/{id}` - Get a bill.
async fn get_bill(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = BillingRepository::new((*state.db).clone());

    match repo.get_bill(id).await {
        Ok(bill) => (StatusCode::OK, Json(json!({ "bill": bill }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/billing/folio/{folio_no}/bill` - Get the bill generated for a folio.
async fn get_bill_by_folio(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = BillingRepository::new((*state.db).clone());

    match repo.get_bill_by_folio(&folio_no).await {
        Ok(bill) => (StatusCode::OK, Json(json!({ "bill": bill }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/billing/folio/{folio_no}/summary` - The folio's reconciled statement.
async fn folio_summary(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = BillingRepository::new((*state.db).clone());

    match repo.folio_statement(&folio_no).await {
        Ok(statement) => (StatusCode::OK, Json(json!({ "statement": statement }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/billing/folio/{folio_no}/journey` - The guest's financial timeline.
async fn guest_journey(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = BillingRepository::new((*state.db).clone());

    match repo.guest_journey(&folio_no).await {
        Ok(journey) => (StatusCode::OK, Json(json!({ "journey": journey }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/billing/folio/{folio_no}/final-bill` - Freeze the folio into a bill.
async fn generate_final_bill(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
    Json(payload): Json<GenerateBillRequest>,
) -> impl IntoResponse {
    let repo = BillingRepository::new((*state.db).clone());

    match repo
        .generate_final_bill(&folio_no, payload.remarks, None)
        .await
    {
        Ok(bill) => {
            info!(
                bill_no = %bill.bill_no,
                folio_no = %bill.folio_no,
                balance_due = %bill.balance_due,
                "Generated final bill"
            );
            (StatusCode::CREATED, Json(json!({ "bill": bill }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST `/billing/settlements` - Settle part or all of a folio's bill.
async fn create_settlement(
    State(state): State<AppState>,
    Json(payload): Json<CreateSettlementRequest>,
) -> impl IntoResponse {
    let repo = BillingRepository::new((*state.db).clone());

    let input = CreateSettlementInput {
        folio_no: payload.folio_no,
        payment_mode: payload.payment_mode,
        amount: payload.amount,
        payment_date: payload
            .payment_date
            .unwrap_or_else(|| Utc::now().date_naive()),
        reference_no: payload.reference_no,
        remarks: payload.remarks,
        user_id: None,
    };

    match repo.create_settlement(input).await {
        Ok(settlement) => {
            info!(
                settlement_id = settlement.id,
                folio_no = %settlement.folio_no,
                amount = %settlement.amount,
                "Recorded settlement"
            );
            (StatusCode::CREATED, Json(json!({ "settlement": settlement }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/billing/folio/{folio_no}/settlements` - Settlements against a folio's bill.
async fn list_settlements(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = BillingRepository::new((*state.db).clone());

    match repo.list_settlements(&folio_no).await {
        Ok(settlements) => {
            (StatusCode::OK, Json(json!({ "settlements": settlements }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

pub(super) fn error_response(err: &BillingError) -> Response {
    match err {
        BillingError::FolioNotFound(_)
        | BillingError::BillNotFound(_)
        | BillingError::NoBillForFolio(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": err.to_string() })),
        )
            .into_response(),
        BillingError::AlreadyBilled(_) | BillingError::AlreadySettled(_) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "billing_conflict", "message": err.to_string() })),
        )
            .into_response(),
        BillingError::InvalidPaymentMode(_) | BillingError::NonPositiveAmount(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_settlement", "message": err.to_string() })),
        )
            .into_response(),
        BillingError::Database(_) => {
            error!(error = %err, "Billing operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
