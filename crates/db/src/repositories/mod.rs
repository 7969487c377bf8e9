//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod course;
pub mod customer;
pub mod language;
pub mod payment;
pub mod report;
pub mod teacher;


pub use course::{CourseError, CourseInput, CourseRepository};
pub use customer::{CustomerError, CustomerInput, CustomerRepository};
pub use language::{LanguageError, LanguageInput, LanguageRepository};
pub use payment::{PaymentError, PaymentInput, PaymentRepository};
pub use report::{ReportQueryError, ReportRepository};
pub use teacher::{TeacherError, TeacherInput, TeacherRepository};
