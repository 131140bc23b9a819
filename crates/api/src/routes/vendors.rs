//! Vendor directory routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use innkeep_db::entities::sea_orm_active_enums::VendorStatus;
use innkeep_db::repositories::{
    CreateVendorInput, UpdateVendorInput, VendorError, VendorRepository,
};

/// Creates the vendor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vendors", get(list_vendors).post(create_vendor))
        .route("/vendors/{id}", get(get_vendor).put(update_vendor))
        .route("/vendors/{id}/rating", post(rate_vendor))
}

/// Request body for registering a vendor.
#[derive(Debug, Deserialize)]
pub struct CreateVendorRequest {
    /// Vendor name.
    pub name: String,
    /// Service type.
    pub service_type: String,
    /// Contact person.
    pub contact_person: Option<String>,
    /// Contact number.
    pub contact_no: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Address.
    pub address: Option<String>,
}

/// Request body for updating a vendor.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateVendorRequest {
    /// New name.
    pub name: Option<String>,
    /// New service type.
    pub service_type: Option<String>,
    /// New contact person.
    pub contact_person: Option<String>,
    /// New contact number.
    pub contact_no: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New status.
    pub status: Option<VendorStatus>,
}

/// Request body for rating a vendor.
#[derive(Debug, Deserialize)]
pub struct RateVendorRequest {
    /// Rating from 1 to 5.
    pub rating: i32,
}

/// Query parameters for the vendor list.
#[derive(Debug, Deserialize)]
pub struct ListVendorsQuery {
    /// Restrict to a service type.
    pub service_type: Option<String>,
}

/// GET `/vendors` - List vendors.
async fn list_vendors(
    State(state): State<AppState>,
    Query(query): Query<ListVendorsQuery>,
) -> impl IntoResponse {
    let repo = VendorRepository::new((*state.db).clone());

    match repo.list_vendors(query.service_type.as_deref()).await {
        Ok(vendors) => (StatusCode::OK, Json(json!({ "vendors": vendors }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/vendors` - Register a vendor.
async fn create_vendor(
    State(state): State<AppState>,
    Json(payload): Json<CreateVendorRequest>,
) -> impl IntoResponse {
    let repo = VendorRepository::new((*state.db).clone());

    let input = CreateVendorInput {
        name: payload.name,
        service_type: payload.service_type,
        contact_person: payload.contact_person,
        contact_no: payload.contact_no,
        email: payload.email,
        address: payload.address,
    };

    match repo.create_vendor(input).await {
        Ok(vendor) => {
            info!(vendor_id = vendor.id, name = %vendor.name, "Registered vendor");
            (StatusCode::CREATED, Json(json!({ "vendor": vendor }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/vendors/{id}` - Get a vendor.
async fn get_vendor(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = VendorRepository::new((*state.db).clone());

    match repo.get_vendor(id).await {
        Ok(vendor) => (StatusCode::OK, Json(json!({ "vendor": vendor }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PUT `/vendors/{id}` - Update a vendor.
async fn update_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateVendorRequest>,
) -> impl IntoResponse {
    let repo = VendorRepository::new((*state.db).clone());

    let input = UpdateVendorInput {
        name: payload.name,
        service_type: payload.service_type,
        contact_person: payload.contact_person,
        contact_no: payload.contact_no,
        email: payload.email,
        address: payload.address,
        status: payload.status,
    };

    match repo.update_vendor(id, input).await {
        Ok(vendor) => (StatusCode::OK, Json(json!({ "vendor": vendor }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/vendors/{id}/rating` - Rate a vendor from 1 to 5.
async fn rate_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RateVendorRequest>,
) -> impl IntoResponse {
    let repo = VendorRepository::new((*state.db).clone());

    match repo.rate_vendor(id, payload.rating).await {
        Ok(vendor) => (StatusCode::OK, Json(json!({ "vendor": vendor }))).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &VendorError) -> Response {
    match err {
        VendorError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "vendor_not_found", "message": err.to_string() })),
        )
            .into_response(),
        VendorError::InvalidRating(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_rating", "message": err.to_string() })),
        )
            .into_response(),
        VendorError::Database(_) => {
            error!(error = %err, "Vendor operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
