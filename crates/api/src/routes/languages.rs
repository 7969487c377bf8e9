//! Language management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::respond};
use lingua_db::entities::languages;
use lingua_db::repositories::{LanguageInput, LanguageRepository};

/// Creates the language routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/languages", get(list_languages).post(create_language))
        .route(
            "/languages/{id}",
            get(get_language).put(update_language).delete(delete_language),
        )
}

/// Request body for creating or updating a language.
#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    /// Unique language name.
    pub name: String,
}

/// Response for a language.
#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    /// Language ID.
    pub id: Uuid,
    /// Language name.
    pub name: String,
}

impl From<languages::Model> for LanguageResponse {
    fn from(model: languages::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// GET `/languages` - List all languages.
async fn list_languages(State(state): State<AppState>) -> impl IntoResponse {
    let repo = LanguageRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(languages) => {
            let response: Vec<LanguageResponse> =
                languages.into_iter().map(LanguageResponse::from).collect();
            (StatusCode::OK, Json(json!({ "languages": response }))).into_response()
        }
        Err(e) => respond(&e.into()),
    }
}

/// POST `/languages` - Create a language.
async fn create_language(
    State(state): State<AppState>,
    Json(request): Json<LanguageRequest>,
) -> impl IntoResponse {
    let repo = LanguageRepository::new((*state.db).clone());
    match repo.create(LanguageInput { name: request.name }).await {
        Ok(language) => {
            (StatusCode::CREATED, Json(LanguageResponse::from(language))).into_response()
        }
        Err(e) => respond(&e.into()),
    }
}

/// GET `/languages/{id}` - Get a language by id.
async fn get_language(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = LanguageRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(language) => (StatusCode::OK, Json(LanguageResponse::from(language))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// PUT `/languages/{id}` - Update a language.
async fn update_language(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<LanguageRequest>,
) -> impl IntoResponse {
    let repo = LanguageRepository::new((*state.db).clone());
    match repo.update(id, LanguageInput { name: request.name }).await {
        Ok(language) => (StatusCode::OK, Json(LanguageResponse::from(language))).into_response(),
        Err(e) => respond(&e.into()),
    }
}

/// DELETE `/languages/{id}` - Delete a language and its courses.
async fn delete_language(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = LanguageRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => respond(&e.into()),
    }
}
