//! Customer (student) management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::respond};
use lingua_db::entities::customers;
use lingua_db::repositories::{CustomerInput, CustomerRepository};

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

/// Request body for creating or updating a customer.
#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    /// Last name.
    pub last_name: String,
    /// First name.
    pub first_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Unique phone number.
    pub phone_number: String,
    /// Sex flag.
    pub sex: bool,
    /// Birth date.
    pub birth_date: NaiveDate,
}

/// Response for a customer.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    /// Customer ID.
    pub id: Uuid,
    /// Last name.
    pub last_name: String,
    /// First name.
    pub first_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Phone number.
    pub phone_number: String,
    /// Sex flag.
    pub sex: bool,
    /// Birth date.
    pub birth_date: NaiveDate,
}

impl From<customers::Model> for CustomerResponse {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            last_name: model.last_name,
            first_name: model.first_name,
            middle_name: model.middle_name,
            phone_number: model.phone_number,
            sex: model.sex,
            birth_date: model.birth_date,
        }
    }
}

impl From<CustomerRequest> for CustomerInput {
    fn from(request: CustomerRequest) -> Self {
        Self {
            last_name: request.last_name,
            first_name: request.first_name,
            middle_name: request.middle_name,
            phone_number: request.phone_number,
            sex: request.sex,
            birth_date: request.birth_date,
        }
    }
}

/// GET `/customers` - List all customers.
async fn list_customers(State(state): State<AppState>) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(customers) => {
            let response: Vec<CustomerResponse> =
                customers.into_iter().map(CustomerResponse::from).collect();
            (StatusCode::OK, Json(json!({ "customers": response }))).into_response()
        }
        Err(e) => respond(&e.into()),
    }
}

/// POST `/customers` - Create a customer.
async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CustomerRequest>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());
    match repo.create(request.into()).await {
        Ok(customer) => {
            (StatusCode::CREATED, Json(CustomerResponse::from(customer))).into_response()
        }
        Err(e) => respond(&e.into()),
    }
}

/// GET `/customers/{id}` - Get a customer by id.
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(customer) => (StatusCode::OK, Json(CustomerResponse::from(customer))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// PUT `/customers/{id}` - Update a customer.
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CustomerRequest>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());
    match repo.update(id, request.into()).await {
        Ok(customer) => (StatusCode::OK, Json(CustomerResponse::from(customer))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// DELETE `/customers/{id}` - Delete a customer and their payments.
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => respond(&e.into()),
    }
}
