//! Course repository for course record database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{courses, languages, teachers};
use lingua_shared::AppError;

/// Error types for course operations.
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    /// Name was empty.
    #[error("Field 'name' must not be empty")]
    EmptyName,

    /// End date precedes start date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Course start date.
        start: NaiveDate,
        /// Course end date.
        end: NaiveDate,
    },

    /// Price must not be negative.
    #[error("Price must not be negative")]
    NegativePrice,

    /// Referenced language does not exist.
    #[error("Language not found: {0}")]
    LanguageNotFound(Uuid),

    /// Referenced teacher does not exist.
    #[error("Teacher not found: {0}")]
    TeacherNotFound(Uuid),

    /// Course not found.
    #[error("Course not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CourseError> for AppError {
    fn from(e: CourseError) -> Self {
        let message = e.to_string();
        match e {
            CourseError::EmptyName
            | CourseError::InvalidDateRange { .. }
            | CourseError::NegativePrice
            | CourseError::LanguageNotFound(_)
            | CourseError::TeacherNotFound(_) => Self::Validation(message),
            CourseError::NotFound(_) => Self::NotFound(message),
            CourseError::Database(_) => Self::Database(message),
        }
    }
}

/// Input for creating or updating a course.
#[derive(Debug, Clone)]
pub struct CourseInput {
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
    /// Owning teacher; `None` leaves the course unassigned.
    pub teacher_id: Option<Uuid>,
}

impl CourseInput {
    fn validate(&self) -> Result<(), CourseError> {
        if self.name.trim().is_empty() {
            return Err(CourseError::EmptyName);
        }
        if self.start_date > self.end_date {
            return Err(CourseError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.price < Decimal::ZERO {
            return Err(CourseError::NegativePrice);
        }
        Ok(())
    }
}

/// Course repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    db: DatabaseConnection,
}

impl CourseRepository {
    /// Creates a new course repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all courses in insertion order.
    pub async fn list(&self) -> Result<Vec<courses::Model>, CourseError> {
        Ok(courses::Entity::find()
            .order_by_asc(courses::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Finds a course by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<courses::Model, CourseError> {
        courses::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CourseError::NotFound(id))
    }

    /// Creates a course.
    pub async fn create(&self, input: CourseInput) -> Result<courses::Model, CourseError> {
        input.validate()?;
        self.check_references(&input).await?;

        let course = courses::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            price: Set(input.price),
            notes: Set(input.notes),
            language_id: Set(input.language_id),
            teacher_id: Set(input.teacher_id),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };

        Ok(course.insert(&self.db).await?)
    }

    /// Updates an existing course.
    pub async fn update(
        &self,
        id: Uuid,
        input: CourseInput,
    ) -> Result<courses::Model, CourseError> {
        input.validate()?;
        let existing = self.find_by_id(id).await?;
        self.check_references(&input).await?;

        let mut course: courses::ActiveModel = existing.into();
        course.name = Set(input.name);
        course.start_date = Set(input.start_date);
        course.end_date = Set(input.end_date);
        course.price = Set(input.price);
        course.notes = Set(input.notes);
        course.language_id = Set(input.language_id);
        course.teacher_id = Set(input.teacher_id);

        Ok(course.update(&self.db).await?)
    }

    /// Deletes a course. Its payments are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<(), CourseError> {
        let existing = self.find_by_id(id).await?;
        courses::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Verifies the referenced language and teacher exist.
    async fn check_references(&self, input: &CourseInput) -> Result<(), CourseError> {
        if languages::Entity::find_by_id(input.language_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(CourseError::LanguageNotFound(input.language_id));
        }

        if let Some(teacher_id) = input.teacher_id
            && teachers::Entity::find_by_id(teacher_id)
                .one(&self.db)
                .await?
                .is_none()
        {
            return Err(CourseError::TeacherNotFound(teacher_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> CourseInput {
        CourseInput {
            name: "English B1 Evening".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 26).unwrap(),
            price: dec!(120.00),
            notes: String::new(),
            language_id: Uuid::new_v4(),
            teacher_id: None,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut i = input();
        i.end_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(matches!(
            i.validate(),
            Err(CourseError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_single_day_course_allowed() {
        let mut i = input();
        i.end_date = i.start_date;
        assert!(i.validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut i = input();
        i.price = dec!(-1.00);
        assert!(matches!(i.validate(), Err(CourseError::NegativePrice)));
    }
}
