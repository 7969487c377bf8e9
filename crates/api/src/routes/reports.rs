//! Financial report route.
//!
//! Aggregation happens on `Decimal` values end to end; amounts become
//! floating-point only here, at the serialization boundary.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::respond};
use lingua_core::report::{
    DetailRow, FinancialReport, LanguageStat, MonthlyStat, ReportService, TeacherStat,
};
use lingua_db::repositories::ReportRepository;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/financial", get(financial_report))
}

/// Query parameters for the financial report.
#[derive(Debug, Deserialize)]
pub struct FinancialReportQuery {
    /// Window start (inclusive, ISO date). Absent means unbounded.
    pub start_date: Option<NaiveDate>,
    /// Window end (inclusive, ISO date). Absent means unbounded.
    pub end_date: Option<NaiveDate>,
}

/// Response for the financial report.
#[derive(Debug, Serialize)]
pub struct FinancialReportResponse {
    /// Sum of paid amounts over the window.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payments: Decimal,
    /// Salary cost over the window.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_teacher_salaries: Decimal,
    /// Payments minus salaries.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    /// Share of payments in the window with paid status.
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_percentage: Decimal,
    /// Per-month breakdown, ascending.
    pub monthly_stats: Vec<MonthlyStatResponse>,
    /// Per-teacher breakdown, revenue descending.
    pub teacher_stats: Vec<TeacherStatResponse>,
    /// Per-language paid revenue, descending.
    pub language_stats: Vec<LanguageStatResponse>,
    /// One row per payment in the window.
    pub detailed_data: Vec<DetailRowResponse>,
}

/// One month in the response.
#[derive(Debug, Serialize)]
pub struct MonthlyStatResponse {
    /// Month as `yyyy-mm`.
    pub month: String,
    /// Paid revenue in the month.
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// Salary cost billed for the month.
    #[serde(with = "rust_decimal::serde::float")]
    pub expenses: Decimal,
    /// Revenue minus expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    /// Number of paid payments.
    pub count: u64,
}

/// One teacher in the response.
#[derive(Debug, Serialize)]
pub struct TeacherStatResponse {
    /// Teacher display name.
    pub name: String,
    /// Salary billed over the window.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_salary: Decimal,
    /// Paid revenue on the teacher's courses.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    /// Paid payments on the teacher's courses.
    pub total_students: u64,
    /// Courses the teacher owns.
    pub courses_count: u64,
    /// Salary as a percentage of revenue.
    #[serde(with = "rust_decimal::serde::float")]
    pub efficiency: Decimal,
}

/// One language in the response.
#[derive(Debug, Serialize)]
pub struct LanguageStatResponse {
    /// Language name.
    pub language: String,
    /// Paid revenue on the language's courses.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// One payment row in the response.
#[derive(Debug, Serialize)]
pub struct DetailRowResponse {
    /// Payment date, ISO `yyyy-mm-dd`.
    pub date: NaiveDate,
    /// Course name.
    pub course: String,
    /// Customer display name.
    pub customer: String,
    /// Amount paid.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Payment status.
    pub status: String,
}

fn format_month(month: NaiveDate) -> String {
    format!("{:04}-{:02}", month.year(), month.month())
}

fn to_response(report: FinancialReport) -> FinancialReportResponse {
    FinancialReportResponse {
        total_payments: report.total_payments,
        total_teacher_salaries: report.total_teacher_salaries,
        total_profit: report.total_profit,
        paid_percentage: report.paid_percentage,
        monthly_stats: report
            .monthly_stats
            .into_iter()
            .map(|m: MonthlyStat| MonthlyStatResponse {
                month: format_month(m.month),
                revenue: m.revenue,
                expenses: m.expenses,
                profit: m.profit,
                count: m.count,
            })
            .collect(),
        teacher_stats: report
            .teacher_stats
            .into_iter()
            .map(|t: TeacherStat| TeacherStatResponse {
                name: t.name,
                total_salary: t.total_salary,
                total_revenue: t.total_revenue,
                total_students: t.total_students,
                courses_count: t.courses_count,
                efficiency: t.efficiency,
            })
            .collect(),
        language_stats: report
            .language_stats
            .into_iter()
            .map(|l: LanguageStat| LanguageStatResponse {
                language: l.language,
                amount: l.amount,
            })
            .collect(),
        detailed_data: report
            .detailed_data
            .into_iter()
            .map(|d: DetailRow| DetailRowResponse {
                date: d.date,
                course: d.course,
                customer: d.customer,
                amount: d.amount,
                status: d.status.to_string(),
            })
            .collect(),
    }
}

/// GET `/reports/financial?start_date=&end_date=` - The financial report.
///
/// Bad input (malformed dates, start after end) is a client error; store
/// failures are server errors. The two are never collapsed.
async fn financial_report(
    State(state): State<AppState>,
    Query(query): Query<FinancialReportQuery>,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());

    let facts = match repo
        .payments_in_range(query.start_date, query.end_date)
        .await
    {
        Ok(facts) => facts,
        Err(e) => return respond(&e.into()),
    };

    let roster = match repo.teacher_roster().await {
        Ok(roster) => roster,
        Err(e) => return respond(&e.into()),
    };

    let report = ReportService::build_report(&roster, &facts);
    (StatusCode::OK, Json(to_response(report))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_month_formatting() {
        let month = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_month(month), "2024-03");
    }

    #[test]
    fn test_amounts_serialize_as_numbers() {
        let response = FinancialReportResponse {
            total_payments: dec!(300.00),
            total_teacher_salaries: dec!(500.00),
            total_profit: dec!(-200.00),
            paid_percentage: dec!(100.00),
            monthly_stats: vec![],
            teacher_stats: vec![TeacherStatResponse {
                name: "Petrov Ivan".to_string(),
                total_salary: dec!(500.00),
                total_revenue: dec!(300.00),
                total_students: 3,
                courses_count: 1,
                efficiency: dec!(166.67),
            }],
            language_stats: vec![],
            detailed_data: vec![],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["total_payments"].is_f64() || value["total_payments"].is_number());
        assert_eq!(value["teacher_stats"][0]["total_students"], 3);
        assert!(value["teacher_stats"][0]["efficiency"].is_number());
    }
}
