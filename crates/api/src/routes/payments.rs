//! Payment management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::respond};
use lingua_db::entities::payments;
use lingua_db::repositories::{PaymentInput, PaymentRepository};
use lingua_shared::types::PaymentStatus;

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments).post(create_payment))
        .route(
            "/payments/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

/// Request body for creating or updating a payment.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    /// Paying customer.
    pub customer_id: Uuid,
    /// Paid course.
    pub course_id: Uuid,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// Amount paid; may differ from the course price.
    pub amount: Decimal,
    /// Payment status: pending, paid, failed, or refunded.
    pub status: PaymentStatus,
    /// Optional grade, 0-100.
    pub grade: Option<i32>,
}

/// Response for a payment.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Payment ID.
    pub id: Uuid,
    /// Paying customer.
    pub customer_id: Uuid,
    /// Paid course.
    pub course_id: Uuid,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// Amount paid.
    pub amount: Decimal,
    /// Payment status.
    pub status: PaymentStatus,
    /// Optional grade.
    pub grade: Option<i32>,
}

impl From<payments::Model> for PaymentResponse {
    fn from(model: payments::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            course_id: model.course_id,
            payment_date: model.payment_date,
            amount: model.amount,
            status: model.status.into(),
            grade: model.grade,
        }
    }
}

impl From<PaymentRequest> for PaymentInput {
    fn from(request: PaymentRequest) -> Self {
        Self {
            customer_id: request.customer_id,
            course_id: request.course_id,
            payment_date: request.payment_date,
            amount: request.amount,
            status: request.status,
            grade: request.grade,
        }
    }
}

/// Query parameters for listing payments.
#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    /// When present, only payments with this status are returned.
    pub status: Option<PaymentStatus>,
}

/// GET `/payments` - List payments, optionally filtered by status.
async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());
    let result = match query.status {
        Some(status) => repo.list_by_status(status).await,
        None => repo.list().await,
    };
    match result {
        Ok(payments) => {
            let response: Vec<PaymentResponse> =
                payments.into_iter().map(PaymentResponse::from).collect();
            (StatusCode::OK, Json(json!({ "payments": response }))).into_response()
        }
        Err(e) => respond(&e.into()),
    }
}

/// POST `/payments` - Create a payment.
async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());
    match repo.create(request.into()).await {
        Ok(payment) => (StatusCode::CREATED, Json(PaymentResponse::from(payment))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// GET `/payments/{id}` - Get a payment by id.
async fn get_payment(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(payment) => (StatusCode::OK, Json(PaymentResponse::from(payment))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// PUT `/payments/{id}` - Update a payment.
async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PaymentRequest>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());
    match repo.update(id, request.into()).await {
        Ok(payment) => (StatusCode::OK, Json(PaymentResponse::from(payment))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// DELETE `/payments/{id}` - Delete a payment.
async fn delete_payment(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => respond(&e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_parses() {
        let query: PaymentListQuery = serde_json::from_value(json!({"status": "paid"}))
            .unwrap();
        assert_eq!(query.status, Some(PaymentStatus::Paid));

        let query: PaymentListQuery = serde_json::from_value(json!({})).unwrap();
        assert!(query.status.is_none());
    }

    #[test]
    fn test_unknown_status_filter_rejected() {
        let result = serde_json::from_value::<PaymentListQuery>(json!({"status": "overdue"}));
        assert!(result.is_err());
    }
}
