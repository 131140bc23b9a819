//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod advances;
pub mod auth;
pub mod billing;
pub mod checkins;
pub mod health;
pub mod housekeeping;
pub mod maintenance;
pub mod payment_workflow;
pub mod post_transactions;
pub mod reservations;
pub mod rooms;
pub mod vendors;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(reservations::routes())
        .merge(checkins::routes())
        .merge(rooms::routes())
        .merge(advances::routes())
        .merge(post_transactions::routes())
        .merge(billing::routes())
        .merge(payment_workflow::routes())
        .merge(housekeeping::routes())
        .merge(maintenance::routes())
        .merge(vendors::routes())
}
