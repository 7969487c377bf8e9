//! Course management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
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
use lingua_db::entities::courses;
use lingua_db::repositories::{CourseInput, CourseRepository};

/// Creates the course routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// Request body for creating or updating a course.
#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    /// Course name.
    pub name: String,
    /// First day of the course.
    pub start_date: NaiveDate,
    /// Last day of the course.
    pub end_date: NaiveDate,
    /// Course price.
    pub price: Decimal,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Language taught by the course.
    pub language_id: Uuid,
    /// Owning teacher; omit to leave the course unassigned.
    pub teacher_id: Option<Uuid>,
}

/// Response for a course.
#[derive(Debug, Serialize)]
pub struct CourseResponse {
    /// Course ID.
    pub id: Uuid,
    /// Course name.
    pub name: String,
    /// First day of the course.
    pub start_date: NaiveDate,
    /// Last day of the course.
    pub end_date: NaiveDate,
    /// Course price.
    pub price: Decimal,
    /// Free-text notes.
    pub notes: String,
    /// Language taught by the course.
    pub language_id: Uuid,
    /// Owning teacher, if assigned.
    pub teacher_id: Option<Uuid>,
}

impl From<courses::Model> for CourseResponse {
    fn from(model: courses::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            start_date: model.start_date,
            end_date: model.end_date,
            price: model.price,
            notes: model.notes,
            language_id: model.language_id,
            teacher_id: model.teacher_id,
        }
    }
}

impl From<CourseRequest> for CourseInput {
    fn from(request: CourseRequest) -> Self {
        Self {
            name: request.name,
            start_date: request.start_date,
            end_date: request.end_date,
            price: request.price,
            notes: request.notes,
            language_id: request.language_id,
            teacher_id: request.teacher_id,
        }
    }
}

/// GET `/courses` - List all courses.
async fn list_courses(State(state): State<AppState>) -> impl IntoResponse {
    let repo = CourseRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(courses) => {
            let response: Vec<CourseResponse> =
                courses.into_iter().map(CourseResponse::from).collect();
            (StatusCode::OK, Json(json!({ "courses": response }))).into_response()
        }
        Err(e) => respond(&e.into()),
    }
}

/// POST `/courses` - Create a course.
async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CourseRequest>,
) -> impl IntoResponse {
    let repo = CourseRepository::new((*state.db).clone());
    match repo.create(request.into()).await {
        Ok(course) => (StatusCode::CREATED, Json(CourseResponse::from(course))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// GET `/courses/{id}` - Get a course by id.
async fn get_course(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = CourseRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(course) => (StatusCode::OK, Json(CourseResponse::from(course))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// PUT `/courses/{id}` - Update a course.
async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CourseRequest>,
) -> impl IntoResponse {
    let repo = CourseRepository::new((*state.db).clone());
    match repo.update(id, request.into()).await {
        Ok(course) => (StatusCode::OK, Json(CourseResponse::from(course))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// DELETE `/courses/{id}` - Delete a course and its payments.
async fn delete_course(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = CourseRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => respond(&e.into()),
    }
}
