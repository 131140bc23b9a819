//! Maintenance ticket routes.

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
use innkeep_db::entities::sea_orm_active_enums::{TicketPriority, TicketStatus};
use innkeep_db::repositories::{
    CreateTicketInput, MaintenanceError, MaintenanceRepository, TicketFilter,
};

/// Creates the maintenance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/maintenance/tickets", get(list_tickets).post(create_ticket))
        .route("/maintenance/tickets/{id}", get(get_ticket))
        .route("/maintenance/tickets/{id}/assign", post(assign_ticket))
        .route("/maintenance/tickets/{id}/start", post(start_ticket))
        .route("/maintenance/tickets/{id}/complete", post(complete_ticket))
        .route("/maintenance/tickets/{id}/cancel", post(cancel_ticket))
}

/// Request body for raising a ticket.
#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    /// Affected room, if room-specific.
    pub room_no: Option<String>,
    /// Affected common area, if not room-specific.
    pub area: Option<String>,
    /// Problem description.
    pub description: String,
    /// Priority; defaults to medium.
    pub priority: Option<TicketPriority>,
    /// Who reported the problem.
    pub reported_by: Option<String>,
}

/// Request body for assigning a ticket.
#[derive(Debug, Deserialize, Default)]
pub struct AssignTicketRequest {
    /// In-house staff member.
    pub assigned_to: Option<String>,
    /// External vendor.
    pub vendor_id: Option<i64>,
}

/// Request body for completing a ticket.
#[derive(Debug, Deserialize, Default)]
pub struct CompleteTicketRequest {
    /// How the problem was resolved.
    pub resolution_notes: Option<String>,
}

/// Query parameters for the ticket list.
#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    /// Filter by status.
    pub status: Option<TicketStatus>,
    /// Filter by priority.
    pub priority: Option<TicketPriority>,
    /// Filter by room.
    pub room_no: Option<String>,
}

/// GET `/maintenance/tickets` - List tickets with filters.
async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> impl IntoResponse {
    let repo = MaintenanceRepository::new((*state.db).clone());

    let filter = TicketFilter {
        status: query.status,
        priority: query.priority,
        room_no: query.room_no,
    };

    match repo.list_tickets(filter).await {
        Ok(tickets) => (StatusCode::OK, Json(json!({ "tickets": tickets }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/maintenance/tickets` - Raise a ticket.
async fn create_ticket(
    State(state): State<AppState>,
    Json(payload): Json<CreateTicketRequest>,
) -> impl IntoResponse {
    let repo = MaintenanceRepository::new((*state.db).clone());

    let input = CreateTicketInput {
        room_no: payload.room_no,
        area: payload.area,
        description: payload.description,
        priority: payload.priority.unwrap_or(TicketPriority::Medium),
        reported_by: payload.reported_by,
        user_id: None,
    };

    match repo.create_ticket(input).await {
        Ok(ticket) => {
            info!(ticket_no = %ticket.ticket_no, "Raised maintenance ticket");
            (StatusCode::CREATED, Json(json!({ "ticket": ticket }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/maintenance/tickets/{id}` - Get a ticket.
async fn get_ticket(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = MaintenanceRepository::new((*state.db).clone());

    match repo.get_ticket(id).await {
        Ok(ticket) => (StatusCode::OK, Json(json!({ "ticket": ticket }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/maintenance/tickets/{id}/assign` - Assign staff or a vendor.
async fn assign_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignTicketRequest>,
) -> impl IntoResponse {
    let repo = MaintenanceRepository::new((*state.db).clone());

    match repo
        .assign_ticket(id, payload.assigned_to, payload.vendor_id)
        .await
    {
        Ok(ticket) => (StatusCode::OK, Json(json!({ "ticket": ticket }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/maintenance/tickets/{id}/start` - Mark work as started.
async fn start_ticket(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = MaintenanceRepository::new((*state.db).clone());

    match repo.start_ticket(id).await {
        Ok(ticket) => (StatusCode::OK, Json(json!({ "ticket": ticket }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/maintenance/tickets/{id}/complete` - Close a ticket as resolved.
async fn complete_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CompleteTicketRequest>,
) -> impl IntoResponse {
    let repo = MaintenanceRepository::new((*state.db).clone());

    match repo.complete_ticket(id, payload.resolution_notes).await {
        Ok(ticket) => {
            info!(ticket_no = %ticket.ticket_no, "Completed maintenance ticket");
            (StatusCode::OK, Json(json!({ "ticket": ticket }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST `/maintenance/tickets/{id}/cancel` - Cancel a ticket.
async fn cancel_ticket(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = MaintenanceRepository::new((*state.db).clone());

    match repo.cancel_ticket(id).await {
        Ok(ticket) => {
            info!(ticket_no = %ticket.ticket_no, "Cancelled maintenance ticket");
            (StatusCode::OK, Json(json!({ "ticket": ticket }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &MaintenanceError) -> Response {
    match err {
        MaintenanceError::NotFound(_)
        | MaintenanceError::NotFoundByNo(_)
        | MaintenanceError::VendorNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": err.to_string() })),
        )
            .into_response(),
        MaintenanceError::AlreadyClosed(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "ticket_closed", "message": err.to_string() })),
        )
            .into_response(),
        MaintenanceError::Database(_) => {
            error!(error = %err, "Maintenance operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
