//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment status enum, mirrors the `payment_status` PostgreSQL type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment expected but not yet received.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Payment received.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Payment attempt failed.
    #[sea_orm(string_value = "failed")]
    Failed,
    /// Payment was refunded to the customer.
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

impl From<PaymentStatus> for lingua_shared::types::PaymentStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Pending => Self::Pending,
            PaymentStatus::Paid => Self::Paid,
            PaymentStatus::Failed => Self::Failed,
            PaymentStatus::Refunded => Self::Refunded,
        }
    }
}

impl From<lingua_shared::types::PaymentStatus> for PaymentStatus {
    fn from(status: lingua_shared::types::PaymentStatus) -> Self {
        match status {
            lingua_shared::types::PaymentStatus::Pending => Self::Pending,
            lingua_shared::types::PaymentStatus::Paid => Self::Paid,
            lingua_shared::types::PaymentStatus::Failed => Self::Failed,
            lingua_shared::types::PaymentStatus::Refunded => Self::Refunded,
        }
    }
}
