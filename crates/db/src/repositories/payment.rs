//! Payment repository for payment record database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{courses, customers, payments, sea_orm_active_enums::PaymentStatus};
use lingua_shared::AppError;

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(Uuid),

    /// Referenced course does not exist.
    #[error("Course not found: {0}")]
    CourseNotFound(Uuid),

    /// Amount must not be negative.
    #[error("Amount must not be negative")]
    NegativeAmount,

    /// Grade out of range.
    #[error("Grade must be between 0 and 100, got {0}")]
    InvalidGrade(i32),

    /// A payment already exists for this customer, course, and date.
    #[error("Duplicate payment for customer {customer_id} on course {course_id} at {date}")]
    Duplicate {
        /// Paying customer.
        customer_id: Uuid,
        /// Paid course.
        course_id: Uuid,
        /// Payment date.
        date: NaiveDate,
    },

    /// Payment not found.
    #[error("Payment not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        let message = e.to_string();
        match e {
            PaymentError::CustomerNotFound(_)
            | PaymentError::CourseNotFound(_)
            | PaymentError::NegativeAmount
            | PaymentError::InvalidGrade(_) => Self::Validation(message),
            PaymentError::Duplicate { .. } => Self::Conflict(message),
            PaymentError::NotFound(_) => Self::NotFound(message),
            PaymentError::Database(_) => Self::Database(message),
        }
    }
}

/// Input for creating or updating a payment.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    /// Paying customer.
    pub customer_id: Uuid,
    /// Paid course.
    pub course_id: Uuid,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// Amount paid; may differ from the course price.
    pub amount: Decimal,
    /// Payment status.
    pub status: lingua_shared::types::PaymentStatus,
    /// Optional grade, 0-100.
    pub grade: Option<i32>,
}

impl PaymentInput {
    fn validate(&self) -> Result<(), PaymentError> {
        if self.amount < Decimal::ZERO {
            return Err(PaymentError::NegativeAmount);
        }
        if let Some(grade) = self.grade
            && !(0..=100).contains(&grade)
        {
            return Err(PaymentError::InvalidGrade(grade));
        }
        Ok(())
    }
}

/// Payment repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all payments by payment date, then insertion order.
    pub async fn list(&self) -> Result<Vec<payments::Model>, PaymentError> {
        Ok(payments::Entity::find()
            .order_by_asc(payments::Column::PaymentDate)
            .order_by_asc(payments::Column::CreatedAt)
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Finds a payment by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<payments::Model, PaymentError> {
        payments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PaymentError::NotFound(id))
    }

    /// Creates a payment.
    pub async fn create(&self, input: PaymentInput) -> Result<payments::Model, PaymentError> {
        input.validate()?;
        self.check_references(&input).await?;
        self.check_unique_key(&input, None).await?;

        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(input.customer_id),
            course_id: Set(input.course_id),
            payment_date: Set(input.payment_date),
            amount: Set(input.amount),
            status: Set(input.status.into()),
            grade: Set(input.grade),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };

        Ok(payment.insert(&self.db).await?)
    }

    /// Updates an existing payment.
    pub async fn update(
        &self,
        id: Uuid,
        input: PaymentInput,
    ) -> Result<payments::Model, PaymentError> {
        input.validate()?;
        let existing = self.find_by_id(id).await?;
        self.check_references(&input).await?;
        self.check_unique_key(&input, Some(id)).await?;

        let mut payment: payments::ActiveModel = existing.into();
        payment.customer_id = Set(input.customer_id);
        payment.course_id = Set(input.course_id);
        payment.payment_date = Set(input.payment_date);
        payment.amount = Set(input.amount);
        payment.status = Set(input.status.into());
        payment.grade = Set(input.grade);

        Ok(payment.update(&self.db).await?)
    }

    /// Deletes a payment.
    pub async fn delete(&self, id: Uuid) -> Result<(), PaymentError> {
        let existing = self.find_by_id(id).await?;
        payments::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Verifies the referenced customer and course exist.
    async fn check_references(&self, input: &PaymentInput) -> Result<(), PaymentError> {
        if customers::Entity::find_by_id(input.customer_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(PaymentError::CustomerNotFound(input.customer_id));
        }

        if courses::Entity::find_by_id(input.course_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(PaymentError::CourseNotFound(input.course_id));
        }
        Ok(())
    }

    /// Enforces the (customer, course, payment_date) uniqueness invariant.
    async fn check_unique_key(
        &self,
        input: &PaymentInput,
        exclude: Option<Uuid>,
    ) -> Result<(), PaymentError> {
        let mut query = payments::Entity::find()
            .filter(payments::Column::CustomerId.eq(input.customer_id))
            .filter(payments::Column::CourseId.eq(input.course_id))
            .filter(payments::Column::PaymentDate.eq(input.payment_date));
        if let Some(id) = exclude {
            query = query.filter(payments::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(PaymentError::Duplicate {
                customer_id: input.customer_id,
                course_id: input.course_id,
                date: input.payment_date,
            });
        }
        Ok(())
    }

    /// Lists payments with the given status, in the same order as `list`.
    pub async fn list_by_status(
        &self,
        status: lingua_shared::types::PaymentStatus,
    ) -> Result<Vec<payments::Model>, PaymentError> {
        let db_status: PaymentStatus = status.into();
        Ok(payments::Entity::find()
            .filter(payments::Column::Status.eq(db_status))
            .order_by_asc(payments::Column::PaymentDate)
            .order_by_asc(payments::Column::CreatedAt)
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> PaymentInput {
        PaymentInput {
            customer_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            payment_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            amount: dec!(120.00),
            status: lingua_shared::types::PaymentStatus::Paid,
            grade: None,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_zero_amount_allowed() {
        let mut i = input();
        i.amount = Decimal::ZERO;
        assert!(i.validate().is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut i = input();
        i.amount = dec!(-0.01);
        assert!(matches!(i.validate(), Err(PaymentError::NegativeAmount)));
    }

    #[test]
    fn test_grade_bounds() {
        let mut i = input();
        i.grade = Some(100);
        assert!(i.validate().is_ok());

        i.grade = Some(101);
        assert!(matches!(i.validate(), Err(PaymentError::InvalidGrade(101))));

        i.grade = Some(-1);
        assert!(matches!(i.validate(), Err(PaymentError::InvalidGrade(-1))));
    }
}
