//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingua_shared::types::PaymentStatus;

/// Owning teacher of a course, as resolved onto a payment fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherRef {
    /// Teacher ID.
    pub id: Uuid,
    /// Display name ("last first").
    pub name: String,
    /// Monthly salary.
    pub salary: Decimal,
}

/// One payment with its course, language, customer, and teacher resolved.
///
/// The payment filter produces these rows already restricted to the
/// requested date window; no further lookups are needed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentFact {
    /// Payment ID.
    pub payment_id: Uuid,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// Amount paid (independent of course price).
    pub amount: Decimal,
    /// Payment status.
    pub status: PaymentStatus,
    /// Course the payment is for.
    pub course_id: Uuid,
    /// Course name.
    pub course_name: String,
    /// Language taught by the course.
    pub language_name: String,
    /// Customer display name ("last first").
    pub customer_name: String,
    /// Owning teacher of the course, if assigned.
    pub teacher: Option<TeacherRef>,
}

/// A teacher as enumerated from the record store.
///
/// Enumeration order is the stable tie-break order for teacher statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherProfile {
    /// Teacher ID.
    pub id: Uuid,
    /// Display name ("last first").
    pub name: String,
    /// Monthly salary.
    pub salary: Decimal,
    /// Number of courses the teacher owns.
    pub courses_count: u64,
}

/// Revenue and cost figures for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyStat {
    /// First day of the month.
    pub month: NaiveDate,
    /// Sum of paid amounts in the month.
    pub revenue: Decimal,
    /// Salary cost billed for the month.
    pub expenses: Decimal,
    /// Revenue minus expenses.
    pub profit: Decimal,
    /// Number of paid payments in the month.
    pub count: u64,
}

/// Aggregated figures for one teacher over the report window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherStat {
    /// Teacher display name.
    pub name: String,
    /// Salary billed: monthly salary times billing months.
    pub total_salary: Decimal,
    /// Sum of paid amounts on the teacher's courses.
    pub total_revenue: Decimal,
    /// Number of paid payments on the teacher's courses.
    pub total_students: u64,
    /// Number of courses the teacher owns.
    pub courses_count: u64,
    /// Salary cost as a percentage of revenue, 2 decimal places.
    pub efficiency: Decimal,
}

/// Paid revenue attributed to one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageStat {
    /// Language name.
    pub language: String,
    /// Sum of paid amounts on the language's courses.
    pub amount: Decimal,
}

/// One flattened row per payment in the filtered set, any status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailRow {
    /// Payment date.
    pub date: NaiveDate,
    /// Course name.
    pub course: String,
    /// Customer display name ("last first").
    pub customer: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Payment status.
    pub status: PaymentStatus,
}

/// The assembled financial report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialReport {
    /// Sum of paid amounts over the filtered window.
    pub total_payments: Decimal,
    /// Salary cost over the same window.
    pub total_teacher_salaries: Decimal,
    /// `total_payments` minus `total_teacher_salaries`.
    pub total_profit: Decimal,
    /// Share of payments in the window with paid status, 2 decimal places.
    pub paid_percentage: Decimal,
    /// Per-month breakdown, ascending; months without paid payments omitted.
    pub monthly_stats: Vec<MonthlyStat>,
    /// Per-teacher breakdown, total revenue descending; idle teachers omitted.
    pub teacher_stats: Vec<TeacherStat>,
    /// Per-language paid revenue, descending; zero-revenue languages omitted.
    pub language_stats: Vec<LanguageStat>,
    /// One row per payment in the window, any status.
    pub detailed_data: Vec<DetailRow>,
}
