//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod courses;
pub mod customers;
pub mod health;
pub mod languages;
pub mod payments;
pub mod reports;
pub mod teachers;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(customers::routes())
        .merge(teachers::routes())
        .merge(languages::routes())
        .merge(courses::routes())
        .merge(payments::routes())
        .merge(reports::routes())
}
