//! Payment status enumeration.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment record.
///
/// Only `Paid` payments contribute to revenue and salary aggregates;
/// every status appears in report detail rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment expected but not yet received.
    Pending,
    /// Payment received.
    Paid,
    /// Payment attempt failed.
    Failed,
    /// Payment was refunded to the customer.
    Refunded,
}

impl PaymentStatus {
    /// Returns true for `Paid`.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Failed => write!(f, "failed"),
            Self::Refunded => write!(f, "refunded"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(format!("Unknown payment status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(PaymentStatus::Pending, "pending")]
    #[case(PaymentStatus::Paid, "paid")]
    #[case(PaymentStatus::Failed, "failed")]
    #[case(PaymentStatus::Refunded, "refunded")]
    fn test_status_round_trips_through_strings(#[case] status: PaymentStatus, #[case] s: &str) {
        assert_eq!(status.to_string(), s);
        assert_eq!(PaymentStatus::from_str(s).unwrap(), status);
        assert_eq!(
            PaymentStatus::from_str(&s.to_uppercase()).unwrap(),
            status
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(PaymentStatus::from_str("cancelled").is_err());
        assert!(PaymentStatus::from_str("").is_err());
    }

    #[test]
    fn test_only_paid_is_paid() {
        assert!(PaymentStatus::Paid.is_paid());
        assert!(!PaymentStatus::Pending.is_paid());
        assert!(!PaymentStatus::Failed.is_paid());
        assert!(!PaymentStatus::Refunded.is_paid());
    }
}
