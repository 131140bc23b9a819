//! Payment workflow routes.
//!
//! Advance payments arrive at three points in the guest lifecycle:
//! before check-in against a reservation, after check-in against a folio,
//! and at the desk for walk-in guests with no reservation at all. Each
//! entry point fills in the right references so the advance classifies
//! into its scenario downstream.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::AppState;
use innkeep_core::AdvanceScenario;
use innkeep_db::repositories::{AdvanceRepository, BillingRepository, CreateAdvanceInput};

use super::{advances, billing};

/// Creates the payment workflow routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payment-workflow/advances/pre-checkin", post(pre_checkin_advance))
        .route("/payment-workflow/advances/post-checkin", post(post_checkin_advance))
        .route("/payment-workflow/advances/walk-in", post(walk_in_advance))
        .route("/payment-workflow/folio/{folio_no}/summary", get(workflow_summary))
        .route("/payment-workflow/scenarios", get(list_scenarios))
}

/// Request body for a pre-check-in advance.
#[derive(Debug, Deserialize)]
pub struct PreCheckinAdvanceRequest {
    /// Reservation the deposit is for.
    pub reservation_no: String,
    /// Payment details.
    #[serde(flatten)]
    pub payment: AdvancePaymentRequest,
}

/// Request body for a post-check-in advance.
#[derive(Debug, Deserialize)]
pub struct PostCheckinAdvanceRequest {
    /// Folio of the in-house guest.
    pub folio_no: String,
    /// Payment details.
    #[serde(flatten)]
    pub payment: AdvancePaymentRequest,
}

/// Shared payment fields for the workflow entry points.
#[derive(Debug, Deserialize)]
pub struct AdvancePaymentRequest {
    /// Guest name; backfilled from the stay when omitted.
    #[serde(default)]
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

impl AdvancePaymentRequest {
    fn into_input(self) -> CreateAdvanceInput {
        CreateAdvanceInput {
            folio_no: None,
            reservation_no: None,
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

/// POST `/payment-workflow/advances/pre-checkin` - Deposit against a reservation.
async fn pre_checkin_advance(
    State(state): State<AppState>,
    Json(payload): Json<PreCheckinAdvanceRequest>,
) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo
        .create_pre_checkin(&payload.reservation_no, payload.payment.into_input())
        .await
    {
        Ok(advance) => {
            info!(
                advance_id = advance.id,
                reservation_no = %payload.reservation_no,
                amount = %advance.amount,
                "Recorded pre-check-in advance"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "scenario": AdvanceScenario::PreCheckin,
                    "advance": advance,
                })),
            )
                .into_response()
        }
        Err(e) => advances::error_response(&e),
    }
}

/// POST `/payment-workflow/advances/post-checkin` - Payment from an in-house guest.
async fn post_checkin_advance(
    State(state): State<AppState>,
    Json(payload): Json<PostCheckinAdvanceRequest>,
) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo
        .create_post_checkin(&payload.folio_no, payload.payment.into_input())
        .await
    {
        Ok(advance) => {
            info!(
                advance_id = advance.id,
                folio_no = %payload.folio_no,
                amount = %advance.amount,
                "Recorded post-check-in advance"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "scenario": AdvanceScenario::PostCheckin,
                    "advance": advance,
                })),
            )
                .into_response()
        }
        Err(e) => advances::error_response(&e),
    }
}

/// POST `/payment-workflow/advances/walk-in` - Payment from a guest with no
/// reservation. A walk-in folio number is minted for the advance.
async fn walk_in_advance(
    State(state): State<AppState>,
    Json(payload): Json<AdvancePaymentRequest>,
) -> impl IntoResponse {
    let repo = AdvanceRepository::new((*state.db).clone());

    match repo.create_walk_in(payload.into_input()).await {
        Ok(advance) => {
            info!(
                advance_id = advance.id,
                folio_no = advance.folio_no.as_deref().unwrap_or_default(),
                amount = %advance.amount,
                "Recorded walk-in advance"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "scenario": AdvanceScenario::WalkIn,
                    "advance": advance,
                })),
            )
                .into_response()
        }
        Err(e) => advances::error_response(&e),
    }
}

/// GET `/payment-workflow/folio/{folio_no}/summary` - Advances on the folio
/// broken down by lifecycle scenario.
async fn workflow_summary(
    State(state): State<AppState>,
    Path(folio_no): Path<String>,
) -> impl IntoResponse {
    let repo = BillingRepository::new((*state.db).clone());

    match repo.folio_statement(&folio_no).await {
        Ok(statement) => {
            let recon = &statement.reconciliation;
            (
                StatusCode::OK,
                Json(json!({
                    "folio_no": folio_no,
                    "total_advances": recon.total_advances,
                    "advance_count": recon.advance_count,
                    "advances_by_scenario": recon.advances_by_scenario,
                    "advances_by_mode": recon.advances_by_mode,
                    "balance_due": recon.balance_due,
                    "status": recon.status,
                })),
            )
                .into_response()
        }
        Err(e) => billing::error_response(&e),
    }
}

/// GET `/payment-workflow/scenarios` - The recognized payment scenarios.
async fn list_scenarios() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "scenarios": [
                {
                    "scenario": AdvanceScenario::PreCheckin,
                    "description": "Deposit taken against a reservation before the guest checks in",
                    "references": { "reservation_no": true, "folio_no": false },
                },
                {
                    "scenario": AdvanceScenario::PostCheckin,
                    "description": "Payment taken from an in-house guest who arrived on a reservation",
                    "references": { "reservation_no": true, "folio_no": true },
                },
                {
                    "scenario": AdvanceScenario::WalkIn,
                    "description": "Payment taken from a walk-in guest with no reservation",
                    "references": { "reservation_no": false, "folio_no": true },
                },
            ],
        })),
    )
}
