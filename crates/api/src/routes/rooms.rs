//! Room inventory routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use innkeep_db::entities::sea_orm_active_enums::RoomStatus;
use innkeep_db::repositories::{CreateRoomInput, RoomError, RoomRepository, UpdateRoomInput};

/// Creates the room routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/available", get(list_available))
        .route("/rooms/{id}", get(get_room).put(update_room).delete(delete_room))
        .route("/rooms/no/{room_no}/status", put(set_status))
}

/// Request body for creating a room.
#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    /// Room number.
    pub room_no: String,
    /// Floor.
    pub floor: i32,
    /// Room type.
    pub room_type: String,
    /// Nightly rate.
    pub rate: Decimal,
    /// Maximum occupancy.
    pub max_occupancy: i32,
    /// Description.
    pub description: Option<String>,
}

/// Request body for updating a room.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateRoomRequest {
    /// New floor.
    pub floor: Option<i32>,
    /// New room type.
    pub room_type: Option<String>,
    /// New rate.
    pub rate: Option<Decimal>,
    /// New maximum occupancy.
    pub max_occupancy: Option<i32>,
    /// New description.
    pub description: Option<String>,
}

/// Request body for a housekeeping status change.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Target status.
    pub status: RoomStatus,
}

/// Query parameters for the availability list.
#[derive(Debug, Deserialize)]
pub struct AvailableQuery {
    /// Restrict to a room type.
    pub room_type: Option<String>,
}

/// GET `/rooms` - List all rooms.
async fn list_rooms(State(state): State<AppState>) -> impl IntoResponse {
    let repo = RoomRepository::new((*state.db).clone());

    match repo.list_rooms().await {
        Ok(rooms) => (StatusCode::OK, Json(json!({ "rooms": rooms }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/rooms/available` - Vacant rooms ready to sell.
async fn list_available(
    State(state): State<AppState>,
    Query(query): Query<AvailableQuery>,
) -> impl IntoResponse {
    let repo = RoomRepository::new((*state.db).clone());

    match repo.list_available(query.room_type.as_deref()).await {
        Ok(rooms) => (StatusCode::OK, Json(json!({ "rooms": rooms }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/rooms` - Create a room.
async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoomRequest>,
) -> impl IntoResponse {
    let repo = RoomRepository::new((*state.db).clone());

    let input = CreateRoomInput {
        room_no: payload.room_no,
        floor: payload.floor,
        room_type: payload.room_type,
        rate: payload.rate,
        max_occupancy: payload.max_occupancy,
        description: payload.description,
    };

    match repo.create_room(input).await {
        Ok(room) => {
            info!(room_no = %room.room_no, "Created room");
            (StatusCode::CREATED, Json(json!({ "room": room }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/rooms/{id}` - Get a room.
async fn get_room(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = RoomRepository::new((*state.db).clone());

    match repo.get_room(id).await {
        Ok(room) => (StatusCode::OK, Json(json!({ "room": room }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PUT `/rooms/{id}` - Update a room.
async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoomRequest>,
) -> impl IntoResponse {
    let repo = RoomRepository::new((*state.db).clone());

    let input = UpdateRoomInput {
        floor: payload.floor,
        room_type: payload.room_type,
        rate: payload.rate,
        max_occupancy: payload.max_occupancy,
        description: payload.description,
    };

    match repo.update_room(id, input).await {
        Ok(room) => (StatusCode::OK, Json(json!({ "room": room }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PUT `/rooms/no/{room_no}/status` - Housekeeping status change.
async fn set_status(
    State(state): State<AppState>,
    Path(room_no): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> impl IntoResponse {
    let repo = RoomRepository::new((*state.db).clone());

    match repo.set_status(&room_no, payload.status).await {
        Ok(room) => (StatusCode::OK, Json(json!({ "room": room }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE `/rooms/{id}` - Delete an unoccupied room.
async fn delete_room(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = RoomRepository::new((*state.db).clone());

    match repo.delete_room(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &RoomError) -> Response {
    match err {
        RoomError::NotFound(_) | RoomError::NotFoundByNo(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "room_not_found", "message": err.to_string() })),
        )
            .into_response(),
        RoomError::DuplicateRoomNo(_) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "duplicate_room", "message": err.to_string() })),
        )
            .into_response(),
        RoomError::Occupied(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "room_occupied", "message": err.to_string() })),
        )
            .into_response(),
        RoomError::Database(_) => {
            error!(error = %err, "Room operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
