//! Posted charge routes.

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
use innkeep_db::entities::sea_orm_active_enums::ChargeStatus;
use innkeep_db::repositories::{
    CreateChargeInput, PostTransactionError, PostTransactionRepository, UpdateChargeInput,
};

/// Creates the post-transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/post-transactions", get(list_charges).post(create_charge))
        .route("/post-transactions/outstanding", get(list_outstanding))
        .route("/post-transactions/{id}", get(get_charge).put(update_charge))
        .route("/post-transactions/{id}/cancel", post(cancel_charge))
        .route("/post-transactions/folio/{folio_no}", get(list_by_folio))
        .route("/post-transactions/folio/{folio_no}/total", get(total_by_folio))
        .route("/post-transactions/acc-head/{acc_head}", get(list_by_acc_head))
}

/// Request body for posting a charge.
#[derive(Debug, Deserialize)]
pub struct CreateChargeRequest {
    /// Folio being charged.
    pub folio_no: String,
    /// Transaction date; defaults to today.
    pub trans_date: Option<NaiveDate>,
    /// Account head.
    pub acc_head: String,
    /// Source voucher number.
    pub voucher_no: Option<String>,
    /// Charge amount.
    pub amount: Decimal,
    /// Narration.
    pub narration: Option<String>,
}

/// Request body for updating a charge.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateChargeRequest {
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

/// GET `/post-transactions` - List all charges.
async fn list_charges(State(state): State<AppState>) -> impl IntoResponse {
    let repo = PostTransactionRepository::new((*state.db).clone());

    match repo.list_charges().await {
        Ok(charges) => (StatusCode::OK, Json(json!({ "charges": charges }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/post-transactions/outstanding` - Charges still pending.
async fn list_outstanding(State(state): State<AppState>) -> impl IntoResponse {
    let repo = PostTransactionRepository::new((*state.db).clone());

    match repo.list_outstanding().await {
        Ok(charges) => (StatusCode::OK, Json(json!({ "charges": charges }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/post-transactions` - Post a charge to a folio.
async fn create_charge(
    State(state): State<AppState>,
    Json(payload): Json<CreateChargeRequest>,
) -> impl IntoResponse {
    let repo = PostTransactionRepository::new((*state.db).clone());

    let input = CreateChargeInput {
        folio_no: payload.folio_no,
        trans_date: payload
            .trans_date
            .unwrap_or_else(|| Utc::now().date_naive()),
        acc_head: payload.acc_head,
        voucher_no: payload.voucher_no,
        amount: payload.amount,
        narration: payload.narration,
        user_id: None,
    };

    match repo.create_charge(input).await {
        Ok(charge) => {
            info!(
                charge_id = charge.id,
                folio_no = %charge.folio_no,
                acc_head = %charge.acc_head,
                "Posted charge"
            );
            (StatusCode::CREATED, Json(json!({ "charge": charge }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/post-transactions/{id}` - Get a charge.
async fn get_charge(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = PostTransactionRepository::new((*state.db).clone());

    match repo.get_charge(id).await {
        Ok(charge) => (StatusCode::OK, Json(json!({ "charge": charge }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/post-transactions/folio/{folio_no}` - Charges on a folio.
async fn list_by_folio(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = PostTransactionRepository::new((*state.db).clone());

    match repo.find_by_folio(&folio_no).await {
        Ok(charges) => (StatusCode::OK, Json(json!({ "charges": charges }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/post-transactions/folio/{folio_no}/total` - Sum of a folio's charges.
async fn total_by_folio(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = PostTransactionRepository::new((*state.db).clone());

    match repo.total_by_folio(&folio_no).await {
        Ok(total) => {
            (StatusCode::OK, Json(json!({ "folio_no": folio_no, "total": total })))
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/post-transactions/acc-head/{acc_head}` - Charges under an account head.
async fn list_by_acc_head(
    State(state): State<AppState>,
    Path(acc_head): Path<String>,
) -> impl IntoResponse {
    let repo = PostTransactionRepository::new((*state.db).clone());

    match repo.find_by_acc_head(&acc_head).await {
        Ok(charges) => (StatusCode::OK, Json(json!({ "charges": charges }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PUT `/post-transactions/{id}` - Update a charge.
async fn update_charge(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateChargeRequest>,
) -> impl IntoResponse {
    let repo = PostTransactionRepository::new((*state.db).clone());

    let input = UpdateChargeInput {
        trans_date: payload.trans_date,
        acc_head: payload.acc_head,
        voucher_no: payload.voucher_no,
        amount: payload.amount,
        narration: payload.narration,
        status: payload.status,
    };

    match repo.update_charge(id, input).await {
        Ok(charge) => (StatusCode::OK, Json(json!({ "charge": charge }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/post-transactions/{id}/cancel` - Cancel a charge.
async fn cancel_charge(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = PostTransactionRepository::new((*state.db).clone());

    match repo.cancel_charge(id).await {
        Ok(charge) => {
            info!(charge_id = charge.id, "Cancelled charge");
            (StatusCode::OK, Json(json!({ "charge": charge }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &PostTransactionError) -> Response {
    match err {
        PostTransactionError::NotFound(_) | PostTransactionError::FolioNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": err.to_string() })),
        )
            .into_response(),
        PostTransactionError::Cancelled(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "charge_cancelled", "message": err.to_string() })),
        )
            .into_response(),
        PostTransactionError::NonPositiveAmount(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_charge", "message": err.to_string() })),
        )
            .into_response(),
        PostTransactionError::Database(_) => {
            error!(error = %err, "Charge operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
