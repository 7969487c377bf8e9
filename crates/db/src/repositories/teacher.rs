//! Teacher repository for teacher record database operations.
//!
//! Also maintains the teacher_languages join table recording which
//! languages a teacher can teach.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{languages, teacher_languages, teachers};
use lingua_shared::AppError;

/// Error types for teacher operations.
#[derive(Debug, thiserror::Error)]
pub enum TeacherError {
    /// A required field was empty.
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// Salary must not be negative.
    #[error("Salary must not be negative")]
    NegativeSalary,

    /// Phone number already registered.
    #[error("Phone number '{0}' is already registered")]
    PhoneTaken(String),

    /// Referenced language does not exist.
    #[error("Language not found: {0}")]
    LanguageNotFound(Uuid),

    /// Teacher not found.
    #[error("Teacher not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TeacherError> for AppError {
    fn from(e: TeacherError) -> Self {
        let message = e.to_string();
        match e {
            TeacherError::EmptyField(_)
            | TeacherError::NegativeSalary
            | TeacherError::LanguageNotFound(_) => Self::Validation(message),
            TeacherError::PhoneTaken(_) => Self::Conflict(message),
            TeacherError::NotFound(_) => Self::NotFound(message),
            TeacherError::Database(_) => Self::Database(message),
        }
    }
}

/// Input for creating or updating a teacher.
#[derive(Debug, Clone)]
pub struct TeacherInput {
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
    pub language_ids: Vec<Uuid>,
}

impl TeacherInput {
    fn validate(&self) -> Result<(), TeacherError> {
        if self.last_name.trim().is_empty() {
            return Err(TeacherError::EmptyField("last_name"));
        }
        if self.first_name.trim().is_empty() {
            return Err(TeacherError::EmptyField("first_name"));
        }
        if self.phone_number.trim().is_empty() {
            return Err(TeacherError::EmptyField("phone_number"));
        }
        if self.salary < Decimal::ZERO {
            return Err(TeacherError::NegativeSalary);
        }
        Ok(())
    }
}

/// Teacher repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TeacherRepository {
    db: DatabaseConnection,
}

impl TeacherRepository {
    /// Creates a new teacher repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all teachers in insertion order.
    pub async fn list(&self) -> Result<Vec<teachers::Model>, TeacherError> {
        Ok(teachers::Entity::find()
            .order_by_asc(teachers::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Finds a teacher by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<teachers::Model, TeacherError> {
        teachers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TeacherError::NotFound(id))
    }

    /// Lists the languages a teacher can teach.
    pub async fn languages_of(&self, id: Uuid) -> Result<Vec<languages::Model>, TeacherError> {
        let teacher = self.find_by_id(id).await?;
        Ok(teacher
            .find_related(languages::Entity)
            .order_by_asc(languages::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Creates a teacher and their language assignments.
    pub async fn create(&self, input: TeacherInput) -> Result<teachers::Model, TeacherError> {
        input.validate()?;
        self.check_phone_free(&input.phone_number, None).await?;
        self.check_languages_exist(&input.language_ids).await?;

        let teacher = teachers::ActiveModel {
            id: Set(Uuid::new_v4()),
            last_name: Set(input.last_name),
            first_name: Set(input.first_name),
            middle_name: Set(input.middle_name),
            phone_number: Set(input.phone_number),
            sex: Set(input.sex),
            birth_date: Set(input.birth_date),
            salary: Set(input.salary),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };

        let teacher = teacher.insert(&self.db).await?;
        self.replace_languages(teacher.id, &input.language_ids)
            .await?;
        Ok(teacher)
    }

    /// Updates an existing teacher and replaces their language assignments.
    pub async fn update(
        &self,
        id: Uuid,
        input: TeacherInput,
    ) -> Result<teachers::Model, TeacherError> {
        input.validate()?;
        let existing = self.find_by_id(id).await?;
        self.check_phone_free(&input.phone_number, Some(id)).await?;
        self.check_languages_exist(&input.language_ids).await?;

        let mut teacher: teachers::ActiveModel = existing.into();
        teacher.last_name = Set(input.last_name);
        teacher.first_name = Set(input.first_name);
        teacher.middle_name = Set(input.middle_name);
        teacher.phone_number = Set(input.phone_number);
        teacher.sex = Set(input.sex);
        teacher.birth_date = Set(input.birth_date);
        teacher.salary = Set(input.salary);

        let teacher = teacher.update(&self.db).await?;
        self.replace_languages(teacher.id, &input.language_ids)
            .await?;
        Ok(teacher)
    }

    /// Deletes a teacher. Their courses become unassigned (SET NULL);
    /// language assignments are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<(), TeacherError> {
        let existing = self.find_by_id(id).await?;
        teachers::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Verifies no other teacher holds the phone number.
    async fn check_phone_free(
        &self,
        phone_number: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), TeacherError> {
        let mut query =
            teachers::Entity::find().filter(teachers::Column::PhoneNumber.eq(phone_number));
        if let Some(id) = exclude {
            query = query.filter(teachers::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(TeacherError::PhoneTaken(phone_number.to_string()));
        }
        Ok(())
    }

    /// Verifies every referenced language exists.
    async fn check_languages_exist(&self, language_ids: &[Uuid]) -> Result<(), TeacherError> {
        for language_id in language_ids {
            if languages::Entity::find_by_id(*language_id)
                .one(&self.db)
                .await?
                .is_none()
            {
                return Err(TeacherError::LanguageNotFound(*language_id));
            }
        }
        Ok(())
    }

    /// Replaces the teacher's language join rows.
    async fn replace_languages(
        &self,
        teacher_id: Uuid,
        language_ids: &[Uuid],
    ) -> Result<(), TeacherError> {
        teacher_languages::Entity::delete_many()
            .filter(teacher_languages::Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await?;

        for language_id in language_ids {
            let row = teacher_languages::ActiveModel {
                id: Set(Uuid::new_v4()),
                teacher_id: Set(teacher_id),
                language_id: Set(*language_id),
                created_at: Set(chrono::Utc::now().into()),
            };
            row.insert(&self.db).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> TeacherInput {
        TeacherInput {
            last_name: "Petrov".to_string(),
            first_name: "Ivan".to_string(),
            middle_name: Some("Sergeevich".to_string()),
            phone_number: "+7-900-000-0001".to_string(),
            sex: true,
            birth_date: NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
            salary: dec!(500.00),
            language_ids: vec![],
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_negative_salary_rejected() {
        let mut i = input();
        i.salary = dec!(-500.00);
        assert!(matches!(i.validate(), Err(TeacherError::NegativeSalary)));
    }

    #[test]
    fn test_zero_salary_allowed() {
        let mut i = input();
        i.salary = Decimal::ZERO;
        assert!(i.validate().is_ok());
    }

    #[test]
    fn test_blank_first_name_rejected() {
        let mut i = input();
        i.first_name = " ".to_string();
        assert!(matches!(
            i.validate(),
            Err(TeacherError::EmptyField("first_name"))
        ));
    }
}
