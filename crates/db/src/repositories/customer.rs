//! Customer repository for student record database operations.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::customers;
use lingua_shared::AppError;

/// Error types for customer operations.
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    /// A required field was empty.
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// Phone number already registered.
    #[error("Phone number '{0}' is already registered")]
    PhoneTaken(String),

    /// Customer not found.
    #[error("Customer not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CustomerError> for AppError {
    fn from(e: CustomerError) -> Self {
        let message = e.to_string();
        match e {
            CustomerError::EmptyField(_) => Self::Validation(message),
            CustomerError::PhoneTaken(_) => Self::Conflict(message),
            CustomerError::NotFound(_) => Self::NotFound(message),
            CustomerError::Database(_) => Self::Database(message),
        }
    }
}

/// Input for creating or updating a customer.
#[derive(Debug, Clone)]
pub struct CustomerInput {
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

impl CustomerInput {
    fn validate(&self) -> Result<(), CustomerError> {
        if self.last_name.trim().is_empty() {
            return Err(CustomerError::EmptyField("last_name"));
        }
        if self.first_name.trim().is_empty() {
            return Err(CustomerError::EmptyField("first_name"));
        }
        if self.phone_number.trim().is_empty() {
            return Err(CustomerError::EmptyField("phone_number"));
        }
        Ok(())
    }
}

/// Customer repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all customers in insertion order.
    pub async fn list(&self) -> Result<Vec<customers::Model>, CustomerError> {
        Ok(customers::Entity::find()
            .order_by_asc(customers::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Finds a customer by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<customers::Model, CustomerError> {
        customers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    /// Creates a customer.
    pub async fn create(&self, input: CustomerInput) -> Result<customers::Model, CustomerError> {
        input.validate()?;
        self.check_phone_free(&input.phone_number, None).await?;

        let customer = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            last_name: Set(input.last_name),
            first_name: Set(input.first_name),
            middle_name: Set(input.middle_name),
            phone_number: Set(input.phone_number),
            sex: Set(input.sex),
            birth_date: Set(input.birth_date),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
        };

        Ok(customer.insert(&self.db).await?)
    }

    /// Updates an existing customer.
    pub async fn update(
        &self,
        id: Uuid,
        input: CustomerInput,
    ) -> Result<customers::Model, CustomerError> {
        input.validate()?;
        let existing = self.find_by_id(id).await?;
        self.check_phone_free(&input.phone_number, Some(id)).await?;

        let mut customer: customers::ActiveModel = existing.into();
        customer.last_name = Set(input.last_name);
        customer.first_name = Set(input.first_name);
        customer.middle_name = Set(input.middle_name);
        customer.phone_number = Set(input.phone_number);
        customer.sex = Set(input.sex);
        customer.birth_date = Set(input.birth_date);

        Ok(customer.update(&self.db).await?)
    }

    /// Deletes a customer. Their payments are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<(), CustomerError> {
        let existing = self.find_by_id(id).await?;
        customers::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Verifies no other customer holds the phone number.
    async fn check_phone_free(
        &self,
        phone_number: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), CustomerError> {
        let mut query = customers::Entity::find()
            .filter(customers::Column::PhoneNumber.eq(phone_number));
        if let Some(id) = exclude {
            query = query.filter(customers::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(CustomerError::PhoneTaken(phone_number.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CustomerInput {
        CustomerInput {
            last_name: "Smirnova".to_string(),
            first_name: "Olga".to_string(),
            middle_name: None,
            phone_number: "+7-900-000-0101".to_string(),
            sex: false,
            birth_date: NaiveDate::from_ymd_opt(1998, 1, 20).unwrap(),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_blank_last_name_rejected() {
        let mut i = input();
        i.last_name = "  ".to_string();
        assert!(matches!(
            i.validate(),
            Err(CustomerError::EmptyField("last_name"))
        ));
    }

    #[test]
    fn test_empty_phone_rejected() {
        let mut i = input();
        i.phone_number = String::new();
        assert!(matches!(
            i.validate(),
            Err(CustomerError::EmptyField("phone_number"))
        ));
    }
}
