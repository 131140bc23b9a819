//! Housekeeping task routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use innkeep_db::entities::sea_orm_active_enums::TaskStatus;
use innkeep_db::repositories::{
    CreateTaskInput, HousekeepingError, HousekeepingRepository, TaskFilter,
};

/// Creates the housekeeping routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/housekeeping/tasks", get(list_tasks).post(create_task))
        .route("/housekeeping/tasks/{id}", get(get_task))
        .route("/housekeeping/tasks/{id}/assign", post(assign_task))
        .route("/housekeeping/tasks/{id}/complete", post(complete_task))
}

/// Request body for creating a task.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Room the task is for.
    pub room_no: String,
    /// Task type, e.g. `cleaning`.
    pub task_type: String,
    /// Scheduled date; defaults to today.
    pub task_date: Option<NaiveDate>,
    /// Staff member assigned up front.
    pub assigned_to: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Request body for assigning a task.
#[derive(Debug, Deserialize)]
pub struct AssignTaskRequest {
    /// Staff member to assign.
    pub assigned_to: String,
}

/// Request body for completing a task.
#[derive(Debug, Deserialize, Default)]
pub struct CompleteTaskRequest {
    /// Completion notes.
    pub notes: Option<String>,
}

/// Query parameters for the task list.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Filter by status.
    pub status: Option<TaskStatus>,
    /// Filter by room.
    pub room_no: Option<String>,
    /// Filter by scheduled date.
    pub date: Option<NaiveDate>,
}

/// GET `/housekeeping/tasks` - List tasks with filters.
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> impl IntoResponse {
    let repo = HousekeepingRepository::new((*state.db).clone());

    let filter = TaskFilter {
        status: query.status,
        room_no: query.room_no,
        task_date: query.date,
    };

    match repo.list_tasks(filter).await {
        Ok(tasks) => (StatusCode::OK, Json(json!({ "tasks": tasks }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/housekeeping/tasks` - Create a task for a room.
async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> impl IntoResponse {
    let repo = HousekeepingRepository::new((*state.db).clone());

    let input = CreateTaskInput {
        room_no: payload.room_no,
        task_type: payload.task_type,
        task_date: payload
            .task_date
            .unwrap_or_else(|| Utc::now().date_naive()),
        assigned_to: payload.assigned_to,
        notes: payload.notes,
        user_id: None,
    };

    match repo.create_task(input).await {
        Ok(task) => {
            info!(task_id = task.id, room_no = %task.room_no, task_type = %task.task_type, "Created housekeeping task");
            (StatusCode::CREATED, Json(json!({ "task": task }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/housekeeping/tasks/{id}` - Get a task.
async fn get_task(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = HousekeepingRepository::new((*state.db).clone());

    match repo.get_task(id).await {
        Ok(task) => (StatusCode::OK, Json(json!({ "task": task }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/housekeeping/tasks/{id}/assign` - Assign a task to a staff member.
async fn assign_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignTaskRequest>,
) -> impl IntoResponse {
    let repo = HousekeepingRepository::new((*state.db).clone());

    match repo.assign_task(id, payload.assigned_to).await {
        Ok(task) => (StatusCode::OK, Json(json!({ "task": task }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/housekeeping/tasks/{id}/complete` - Complete a task. Finishing a
/// cleaning task on a dirty room returns the room to vacant.
async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CompleteTaskRequest>,
) -> impl IntoResponse {
    let repo = HousekeepingRepository::new((*state.db).clone());

    match repo.complete_task(id, payload.notes).await {
        Ok(task) => {
            info!(task_id = task.id, room_no = %task.room_no, "Completed housekeeping task");
            (StatusCode::OK, Json(json!({ "task": task }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &HousekeepingError) -> Response {
    match err {
        HousekeepingError::NotFound(_) | HousekeepingError::RoomNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": err.to_string() })),
        )
            .into_response(),
        HousekeepingError::AlreadyCompleted(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "task_completed", "message": err.to_string() })),
        )
            .into_response(),
        HousekeepingError::Database(_) => {
            error!(error = %err, "Housekeeping operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
