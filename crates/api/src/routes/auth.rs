//! Staff account registration and login.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use innkeep_db::entities::sea_orm_active_enums::UserRole;
use innkeep_db::repositories::{RegisterUserInput, UserError, UserRepository};

/// Creates the auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Request body for registering a staff account.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Role; defaults to staff.
    pub role: Option<UserRole>,
}

/// Request body for logging in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// POST `/auth/register` - Register a staff account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    let input = RegisterUserInput {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        full_name: payload.full_name,
        role: payload.role.unwrap_or(UserRole::Staff),
    };

    match repo.register(input).await {
        Ok(user) => {
            info!(username = %user.username, "Registered staff account");
            (StatusCode::CREATED, Json(json!({ "user": user }))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST `/auth/login` - Verify credentials and return the profile.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    match repo.verify_credentials(&payload.username, &payload.password).await {
        Ok(user) => (StatusCode::OK, Json(json!({ "user": user }))).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &UserError) -> Response {
    match err {
        UserError::DuplicateUsername(_) | UserError::DuplicateEmail(_) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "duplicate_account", "message": err.to_string() })),
        )
            .into_response(),
        UserError::InvalidCredentials | UserError::Inactive(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_credentials", "message": "Invalid credentials" })),
        )
            .into_response(),
        UserError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": err.to_string() })),
        )
            .into_response(),
        UserError::Password(_) | UserError::Database(_) => {
            error!(error = %err, "User operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "message": "An error occurred" })),
            )
                .into_response()
        }
    }
}
