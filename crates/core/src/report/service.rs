//! Financial report computation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{
    DetailRow, FinancialReport, LanguageStat, MonthlyStat, PaymentFact, TeacherProfile,
    TeacherStat,
};

/// Accumulator for one calendar month of paid payments.
#[derive(Default)]
struct MonthBucket {
    revenue: Decimal,
    count: u64,
    /// Distinct teachers with a paid payment this month, and their salaries.
    /// Keyed by teacher id so each salary is billed at most once per month.
    teacher_salaries: BTreeMap<Uuid, Decimal>,
}

impl MonthBucket {
    fn expenses(&self) -> Decimal {
        self.teacher_salaries.values().copied().sum()
    }
}

/// Service for generating the financial report.
pub struct ReportService;

impl ReportService {
    /// Sums `amount` over paid payments. Zero for an empty set.
    #[must_use]
    pub fn total_paid(facts: &[PaymentFact]) -> Decimal {
        facts
            .iter()
            .filter(|f| f.status.is_paid())
            .map(|f| f.amount)
            .sum()
    }

    /// Total salary cost over the set: each teacher's salary is billed once
    /// per calendar month in which any of their courses had a paid payment.
    #[must_use]
    pub fn salary_cost(facts: &[PaymentFact]) -> Decimal {
        Self::monthly_buckets(facts)
            .values()
            .map(MonthBucket::expenses)
            .sum()
    }

    /// Per-month revenue, expenses, profit, and paid-payment count.
    ///
    /// Months are emitted in ascending order; months without a paid payment
    /// do not appear.
    #[must_use]
    pub fn monthly_stats(facts: &[PaymentFact]) -> Vec<MonthlyStat> {
        Self::monthly_buckets(facts)
            .into_iter()
            .map(|(month, bucket)| {
                let expenses = bucket.expenses();
                MonthlyStat {
                    month,
                    revenue: bucket.revenue,
                    expenses,
                    profit: bucket.revenue - expenses,
                    count: bucket.count,
                }
            })
            .collect()
    }

    /// Per-teacher revenue, salary billing, and efficiency.
    ///
    /// Teachers without a paid payment in the window are excluded. The
    /// result is sorted by total revenue descending; ties keep the roster's
    /// enumeration order.
    #[must_use]
    pub fn teacher_stats(roster: &[TeacherProfile], facts: &[PaymentFact]) -> Vec<TeacherStat> {
        let mut stats: Vec<TeacherStat> = roster
            .iter()
            .filter_map(|teacher| Self::teacher_stat(teacher, facts))
            .collect();

        // Stable sort: equal revenues keep roster order.
        stats.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        stats
    }

    /// Paid revenue per language, descending; zero-revenue languages omitted.
    #[must_use]
    pub fn language_stats(facts: &[PaymentFact]) -> Vec<LanguageStat> {
        let mut amounts: Vec<LanguageStat> = Vec::new();

        for fact in facts.iter().filter(|f| f.status.is_paid()) {
            match amounts
                .iter_mut()
                .find(|s| s.language == fact.language_name)
            {
                Some(stat) => stat.amount += fact.amount,
                None => amounts.push(LanguageStat {
                    language: fact.language_name.clone(),
                    amount: fact.amount,
                }),
            }
        }

        amounts.retain(|s| s.amount > Decimal::ZERO);
        amounts.sort_by(|a, b| b.amount.cmp(&a.amount));
        amounts
    }

    /// Share of payments in the set with paid status, as a percentage
    /// rounded to 2 decimal places. Zero for an empty set.
    #[must_use]
    pub fn paid_percentage(facts: &[PaymentFact]) -> Decimal {
        if facts.is_empty() {
            return Decimal::ZERO;
        }
        let paid = facts.iter().filter(|f| f.status.is_paid()).count();
        (Decimal::from(paid) / Decimal::from(facts.len()) * Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// One row per payment in the set, any status, in input order.
    #[must_use]
    pub fn detail_rows(facts: &[PaymentFact]) -> Vec<DetailRow> {
        facts
            .iter()
            .map(|f| DetailRow {
                date: f.payment_date,
                course: f.course_name.clone(),
                customer: f.customer_name.clone(),
                amount: f.amount,
                status: f.status,
            })
            .collect()
    }

    /// Assembles the full report from the filtered payment set and the
    /// teacher roster. Pure composition over the functions above.
    #[must_use]
    pub fn build_report(roster: &[TeacherProfile], facts: &[PaymentFact]) -> FinancialReport {
        let total_payments = Self::total_paid(facts);
        let total_teacher_salaries = Self::salary_cost(facts);

        FinancialReport {
            total_payments,
            total_teacher_salaries,
            total_profit: total_payments - total_teacher_salaries,
            paid_percentage: Self::paid_percentage(facts),
            monthly_stats: Self::monthly_stats(facts),
            teacher_stats: Self::teacher_stats(roster, facts),
            language_stats: Self::language_stats(facts),
            detailed_data: Self::detail_rows(facts),
        }
    }

    /// Partitions paid payments into calendar-month buckets.
    fn monthly_buckets(facts: &[PaymentFact]) -> BTreeMap<NaiveDate, MonthBucket> {
        let mut buckets: BTreeMap<NaiveDate, MonthBucket> = BTreeMap::new();

        for fact in facts.iter().filter(|f| f.status.is_paid()) {
            let month = first_of_month(fact.payment_date);
            let bucket = buckets.entry(month).or_default();
            bucket.revenue += fact.amount;
            bucket.count += 1;
            if let Some(teacher) = &fact.teacher {
                bucket.teacher_salaries.insert(teacher.id, teacher.salary);
            }
        }

        buckets
    }

    /// Computes one teacher's stats, or `None` when they had no paid
    /// payment in the window.
    fn teacher_stat(teacher: &TeacherProfile, facts: &[PaymentFact]) -> Option<TeacherStat> {
        let mut total_revenue = Decimal::ZERO;
        let mut total_students = 0u64;
        let mut billing_months: BTreeSet<NaiveDate> = BTreeSet::new();

        for fact in facts.iter().filter(|f| f.status.is_paid()) {
            let owns = fact.teacher.as_ref().is_some_and(|t| t.id == teacher.id);
            if !owns {
                continue;
            }
            total_revenue += fact.amount;
            total_students += 1;
            billing_months.insert(first_of_month(fact.payment_date));
        }

        if total_students == 0 {
            return None;
        }

        let total_salary = teacher.salary * Decimal::from(billing_months.len());
        let efficiency = if total_revenue.is_zero() {
            Decimal::ZERO
        } else {
            (total_salary / total_revenue * Decimal::ONE_HUNDRED).round_dp(2)
        };

        Some(TeacherStat {
            name: teacher.name.clone(),
            total_salary,
            total_revenue,
            total_students,
            courses_count: teacher.courses_count,
            efficiency,
        })
    }
}

/// Truncates a date to the first day of its month.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
