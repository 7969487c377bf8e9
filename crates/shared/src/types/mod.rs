//! Small value types shared across crates.

pub mod person;
pub mod status;

pub use person::full_name;
pub use status::PaymentStatus;
