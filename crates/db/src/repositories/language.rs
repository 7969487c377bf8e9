//! Language repository for language record database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::languages;
use lingua_shared::AppError;

/// Error types for language operations.
#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    /// Name was empty.
    #[error("Field 'name' must not be empty")]
    EmptyName,

    /// Language name already exists.
    #[error("Language '{0}' already exists")]
    NameTaken(String),

    /// Language not found.
    #[error("Language not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LanguageError> for AppError {
    fn from(e: LanguageError) -> Self {
        let message = e.to_string();
        match e {
            LanguageError::EmptyName => Self::Validation(message),
            LanguageError::NameTaken(_) => Self::Conflict(message),
            LanguageError::NotFound(_) => Self::NotFound(message),
            LanguageError::Database(_) => Self::Database(message),
        }
    }
}

/// Input for creating or updating a language.
#[derive(Debug, Clone)]
pub struct LanguageInput {
    /// Unique language name.
    pub name: String,
}

/// Language repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct LanguageRepository {
    db: DatabaseConnection,
}

impl LanguageRepository {
    /// Creates a new language repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all languages by name.
    pub async fn list(&self) -> Result<Vec<languages::Model>, LanguageError> {
        Ok(languages::Entity::find()
            .order_by_asc(languages::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Finds a language by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<languages::Model, LanguageError> {
        languages::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(LanguageError::NotFound(id))
    }

    /// Creates a language.
    pub async fn create(&self, input: LanguageInput) -> Result<languages::Model, LanguageError> {
        if input.name.trim().is_empty() {
            return Err(LanguageError::EmptyName);
        }
        self.check_name_free(&input.name, None).await?;

        let language = languages::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };

        Ok(language.insert(&self.db).await?)
    }

    /// Updates an existing language.
    pub async fn update(
        &self,
        id: Uuid,
        input: LanguageInput,
    ) -> Result<languages::Model, LanguageError> {
        if input.name.trim().is_empty() {
            return Err(LanguageError::EmptyName);
        }
        let existing = self.find_by_id(id).await?;
        self.check_name_free(&input.name, Some(id)).await?;

        let mut language: languages::ActiveModel = existing.into();
        language.name = Set(input.name);
        Ok(language.update(&self.db).await?)
    }

    /// Deletes a language. Its courses are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<(), LanguageError> {
        let existing = self.find_by_id(id).await?;
        languages::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Verifies no other language holds the name.
    async fn check_name_free(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), LanguageError> {
        let mut query = languages::Entity::find().filter(languages::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(languages::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(LanguageError::NameTaken(name.to_string()));
        }
        Ok(())
    }
}
