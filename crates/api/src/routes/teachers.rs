//! Teacher management routes.

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

use crate::routes::languages::LanguageResponse;
use crate::{AppState, error::respond};
use lingua_db::entities::teachers;
use lingua_db::repositories::{TeacherInput, TeacherRepository};

/// Creates the teacher routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route(
            "/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        .route("/teachers/{id}/languages", get(get_teacher_languages))
}

/// Request body for creating or updating a teacher.
#[derive(Debug, Deserialize)]
pub struct TeacherRequest {
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
    /// Monthly salary.
    pub salary: Decimal,
    /// Languages the teacher can teach.
    #[serde(default)]
    pub language_ids: Vec<Uuid>,
}

/// Response for a teacher.
#[derive(Debug, Serialize)]
pub struct TeacherResponse {
    /// Teacher ID.
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
    /// Monthly salary.
    pub salary: Decimal,
}

impl From<teachers::Model> for TeacherResponse {
    fn from(model: teachers::Model) -> Self {
        Self {
            id: model.id,
            last_name: model.last_name,
            first_name: model.first_name,
            middle_name: model.middle_name,
            phone_number: model.phone_number,
            sex: model.sex,
            birth_date: model.birth_date,
            salary: model.salary,
        }
    }
}

impl From<TeacherRequest> for TeacherInput {
    fn from(request: TeacherRequest) -> Self {
        Self {
            last_name: request.last_name,
            first_name: request.first_name,
            middle_name: request.middle_name,
            phone_number: request.phone_number,
            sex: request.sex,
            birth_date: request.birth_date,
            salary: request.salary,
            language_ids: request.language_ids,
        }
    }
}

/// GET `/teachers` - List all teachers.
async fn list_teachers(State(state): State<AppState>) -> impl IntoResponse {
    let repo = TeacherRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(teachers) => {
            let response: Vec<TeacherResponse> =
                teachers.into_iter().map(TeacherResponse::from).collect();
            (StatusCode::OK, Json(json!({ "teachers": response }))).into_response()
        }
        Err(e) => respond(&e.into()),
    }
}

/// POST `/teachers` - Create a teacher.
async fn create_teacher(
    State(state): State<AppState>,
    Json(request): Json<TeacherRequest>,
) -> impl IntoResponse {
    let repo = TeacherRepository::new((*state.db).clone());
    match repo.create(request.into()).await {
        Ok(teacher) => (StatusCode::CREATED, Json(TeacherResponse::from(teacher))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// GET `/teachers/{id}` - Get a teacher by id.
async fn get_teacher(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = TeacherRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(teacher) => (StatusCode::OK, Json(TeacherResponse::from(teacher))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// GET `/teachers/{id}/languages` - Languages the teacher can teach.
async fn get_teacher_languages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TeacherRepository::new((*state.db).clone());
    match repo.languages_of(id).await {
        Ok(languages) => {
            let response: Vec<LanguageResponse> =
                languages.into_iter().map(LanguageResponse::from).collect();
            (StatusCode::OK, Json(json!({ "languages": response }))).into_response()
        }
        Err(e) => respond(&e.into()),
    }
}

/// PUT `/teachers/{id}` - Update a teacher.
async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TeacherRequest>,
) -> impl IntoResponse {
    let repo = TeacherRepository::new((*state.db).clone());
    match repo.update(id, request.into()).await {
        Ok(teacher) => (StatusCode::OK, Json(TeacherResponse::from(teacher))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// DELETE `/teachers/{id}` - Delete a teacher; their courses become unassigned.
async fn delete_teacher(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = TeacherRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => respond(&e.into()),
    }
}
