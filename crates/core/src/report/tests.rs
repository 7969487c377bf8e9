//! Tests for the financial report module.

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use lingua_shared::types::PaymentStatus;

use super::service::ReportService;
use super::types::{PaymentFact, TeacherProfile, TeacherRef};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn teacher(name: &str, salary: Decimal) -> TeacherProfile {
    TeacherProfile {
        id: Uuid::new_v4(),
        name: name.to_string(),
        salary,
        courses_count: 1,
    }
}

fn fact(
    day: NaiveDate,
    amount: Decimal,
    status: PaymentStatus,
    teacher: Option<&TeacherProfile>,
) -> PaymentFact {
    PaymentFact {
        payment_id: Uuid::new_v4(),
        payment_date: day,
        amount,
        status,
        course_id: Uuid::new_v4(),
        course_name: "English B2".to_string(),
        language_name: "English".to_string(),
        customer_name: "Ivanova Anna".to_string(),
        teacher: teacher.map(|t| TeacherRef {
            id: t.id,
            name: t.name.clone(),
            salary: t.salary,
        }),
    }
}

// ============================================================================
// Totals
// ============================================================================

#[test]
fn test_total_paid_empty_set_is_zero() {
    assert_eq!(ReportService::total_paid(&[]), Decimal::ZERO);
}

#[test]
fn test_total_paid_counts_only_paid_status() {
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![
        fact(date(2024, 1, 10), dec!(100), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 1, 11), dec!(40), PaymentStatus::Pending, Some(&t)),
        fact(date(2024, 1, 12), dec!(60), PaymentStatus::Failed, Some(&t)),
        fact(date(2024, 1, 13), dec!(80), PaymentStatus::Refunded, Some(&t)),
        fact(date(2024, 2, 1), dec!(25.50), PaymentStatus::Paid, Some(&t)),
    ];

    assert_eq!(ReportService::total_paid(&facts), dec!(125.50));
}

// ============================================================================
// Salary billing
// ============================================================================

#[test]
fn test_salary_billed_once_per_month_regardless_of_payment_count() {
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![
        fact(date(2024, 3, 1), dec!(100), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 3, 15), dec!(100), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 3, 28), dec!(100), PaymentStatus::Paid, Some(&t)),
    ];

    assert_eq!(ReportService::salary_cost(&facts), dec!(500));
}

#[test]
fn test_salary_billed_per_month_across_two_months() {
    // Same teacher, same course, paid payments in two distinct months:
    // billed twice, not once.
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![
        fact(date(2024, 3, 10), dec!(100), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 4, 10), dec!(100), PaymentStatus::Paid, Some(&t)),
    ];

    assert_eq!(ReportService::salary_cost(&facts), dec!(1000));

    let stats = ReportService::teacher_stats(&[t], &facts);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].total_salary, dec!(1000));
}

#[test]
fn test_unassigned_course_contributes_no_salary() {
    let facts = vec![fact(date(2024, 3, 10), dec!(100), PaymentStatus::Paid, None)];

    assert_eq!(ReportService::salary_cost(&facts), Decimal::ZERO);
    assert_eq!(ReportService::total_paid(&facts), dec!(100));
    assert!(ReportService::teacher_stats(&[], &facts).is_empty());
}

#[test]
fn test_two_teachers_same_month_both_billed() {
    let a = teacher("Petrov Ivan", dec!(500));
    let b = teacher("Sidorova Olga", dec!(700));
    let facts = vec![
        fact(date(2024, 5, 2), dec!(100), PaymentStatus::Paid, Some(&a)),
        fact(date(2024, 5, 3), dec!(100), PaymentStatus::Paid, Some(&b)),
        fact(date(2024, 5, 4), dec!(100), PaymentStatus::Paid, Some(&a)),
    ];

    assert_eq!(ReportService::salary_cost(&facts), dec!(1200));
}

// ============================================================================
// Monthly stats
// ============================================================================

#[test]
fn test_monthly_stats_ascending_and_no_zero_months() {
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![
        fact(date(2024, 6, 5), dec!(200), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 2, 5), dec!(100), PaymentStatus::Paid, Some(&t)),
        // April only has a pending payment: no April entry expected.
        fact(date(2024, 4, 5), dec!(999), PaymentStatus::Pending, Some(&t)),
    ];

    let stats = ReportService::monthly_stats(&facts);
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].month, date(2024, 2, 1));
    assert_eq!(stats[1].month, date(2024, 6, 1));
    assert_eq!(stats[0].revenue, dec!(100));
    assert_eq!(stats[1].revenue, dec!(200));
}

#[test]
fn test_monthly_profit_is_revenue_minus_expenses() {
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![
        fact(date(2024, 2, 5), dec!(300), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 2, 6), dec!(400), PaymentStatus::Paid, Some(&t)),
    ];

    let stats = ReportService::monthly_stats(&facts);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].revenue, dec!(700));
    assert_eq!(stats[0].expenses, dec!(500));
    assert_eq!(stats[0].profit, dec!(200));
    assert_eq!(stats[0].count, 2);
}

// ============================================================================
// Teacher stats
// ============================================================================

#[test]
fn test_idle_teacher_excluded() {
    let active = teacher("Petrov Ivan", dec!(500));
    let idle = teacher("Sidorova Olga", dec!(700));
    let facts = vec![fact(
        date(2024, 1, 5),
        dec!(100),
        PaymentStatus::Paid,
        Some(&active),
    )];

    let stats = ReportService::teacher_stats(&[active, idle], &facts);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].name, "Petrov Ivan");
}

#[test]
fn test_teacher_stats_sorted_by_revenue_descending() {
    let low = teacher("Petrov Ivan", dec!(500));
    let high = teacher("Sidorova Olga", dec!(500));
    let facts = vec![
        fact(date(2024, 1, 5), dec!(100), PaymentStatus::Paid, Some(&low)),
        fact(date(2024, 1, 6), dec!(900), PaymentStatus::Paid, Some(&high)),
    ];

    let stats = ReportService::teacher_stats(&[low, high], &facts);
    assert_eq!(stats[0].name, "Sidorova Olga");
    assert_eq!(stats[1].name, "Petrov Ivan");
}

#[test]
fn test_teacher_stats_tie_keeps_roster_order() {
    let first = teacher("Petrov Ivan", dec!(500));
    let second = teacher("Sidorova Olga", dec!(700));
    let facts = vec![
        fact(date(2024, 1, 6), dec!(100), PaymentStatus::Paid, Some(&second)),
        fact(date(2024, 1, 5), dec!(100), PaymentStatus::Paid, Some(&first)),
    ];

    let stats = ReportService::teacher_stats(&[first, second], &facts);
    assert_eq!(stats[0].name, "Petrov Ivan");
    assert_eq!(stats[1].name, "Sidorova Olga");
}

#[test]
fn test_efficiency_zero_when_revenue_zero() {
    // A paid payment of zero amount still counts a student but no revenue.
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![fact(date(2024, 1, 5), dec!(0), PaymentStatus::Paid, Some(&t))];

    let stats = ReportService::teacher_stats(&[t], &facts);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].total_revenue, Decimal::ZERO);
    assert_eq!(stats[0].efficiency, Decimal::ZERO);
}

#[rstest]
#[case(dec!(500), dec!(300), dec!(166.67))]
#[case(dec!(500), dec!(500), dec!(100.00))]
#[case(dec!(500), dec!(1000), dec!(50.00))]
#[case(dec!(250), dec!(750), dec!(33.33))]
fn test_efficiency_rounded_to_two_decimals(
    #[case] salary: Decimal,
    #[case] revenue: Decimal,
    #[case] expected: Decimal,
) {
    let t = teacher("Petrov Ivan", salary);
    let facts = vec![fact(date(2024, 1, 5), revenue, PaymentStatus::Paid, Some(&t))];

    let stats = ReportService::teacher_stats(&[t], &facts);
    assert_eq!(stats[0].efficiency, expected);
}

// ============================================================================
// Language stats, percentage, detail rows
// ============================================================================

#[test]
fn test_language_stats_paid_only_descending() {
    let t = teacher("Petrov Ivan", dec!(500));
    let mut spanish = fact(date(2024, 1, 5), dec!(80), PaymentStatus::Paid, Some(&t));
    spanish.language_name = "Spanish".to_string();
    let facts = vec![
        fact(date(2024, 1, 6), dec!(200), PaymentStatus::Paid, Some(&t)),
        spanish,
        fact(date(2024, 1, 7), dec!(999), PaymentStatus::Pending, Some(&t)),
    ];

    let stats = ReportService::language_stats(&facts);
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].language, "English");
    assert_eq!(stats[0].amount, dec!(200));
    assert_eq!(stats[1].language, "Spanish");
    assert_eq!(stats[1].amount, dec!(80));
}

#[test]
fn test_paid_percentage() {
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![
        fact(date(2024, 1, 5), dec!(100), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 1, 6), dec!(100), PaymentStatus::Pending, Some(&t)),
        fact(date(2024, 1, 7), dec!(100), PaymentStatus::Paid, Some(&t)),
    ];

    assert_eq!(ReportService::paid_percentage(&facts), dec!(66.67));
    assert_eq!(ReportService::paid_percentage(&[]), Decimal::ZERO);
}

#[test]
fn test_pending_payment_in_details_but_not_aggregates() {
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![fact(
        date(2024, 1, 5),
        dec!(100),
        PaymentStatus::Pending,
        Some(&t),
    )];

    let report = ReportService::build_report(std::slice::from_ref(&t), &facts);
    assert_eq!(report.total_payments, Decimal::ZERO);
    assert_eq!(report.total_teacher_salaries, Decimal::ZERO);
    assert!(report.monthly_stats.is_empty());
    assert!(report.teacher_stats.is_empty());
    assert_eq!(report.detailed_data.len(), 1);
    assert_eq!(report.detailed_data[0].status, PaymentStatus::Pending);
}

#[test]
fn test_detail_rows_keep_input_order() {
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![
        fact(date(2024, 3, 1), dec!(10), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 1, 1), dec!(20), PaymentStatus::Failed, Some(&t)),
        fact(date(2024, 2, 1), dec!(30), PaymentStatus::Refunded, Some(&t)),
    ];

    let rows = ReportService::detail_rows(&facts);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].amount, dec!(10));
    assert_eq!(rows[1].amount, dec!(20));
    assert_eq!(rows[2].amount, dec!(30));
}

// ============================================================================
// Assembled report
// ============================================================================

#[test]
fn test_report_scenario_three_paid_payments_one_month() {
    // Course priced $100, teacher salary $500/month, 3 paid payments of
    // $100 each in one month: totals 300 / 500, efficiency 166.67.
    let t = teacher("Petrov Ivan", dec!(500));
    let facts = vec![
        fact(date(2024, 9, 3), dec!(100), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 9, 12), dec!(100), PaymentStatus::Paid, Some(&t)),
        fact(date(2024, 9, 27), dec!(100), PaymentStatus::Paid, Some(&t)),
    ];

    let report = ReportService::build_report(std::slice::from_ref(&t), &facts);
    assert_eq!(report.total_payments, dec!(300));
    assert_eq!(report.total_teacher_salaries, dec!(500));
    assert_eq!(report.total_profit, dec!(-200));
    assert_eq!(report.paid_percentage, dec!(100.00));

    assert_eq!(report.teacher_stats.len(), 1);
    let stat = &report.teacher_stats[0];
    assert_eq!(stat.total_salary, dec!(500));
    assert_eq!(stat.total_revenue, dec!(300));
    assert_eq!(stat.total_students, 3);
    assert_eq!(stat.efficiency, dec!(166.67));
}

// ============================================================================
// Properties
// ============================================================================

prop_compose! {
    fn arb_status()(idx in 0usize..4) -> PaymentStatus {
        [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
        ][idx]
    }
}

prop_compose! {
    fn arb_fact(teachers: Vec<TeacherProfile>)(
        month in 1u32..=12,
        day in 1u32..=28,
        cents in 0i64..1_000_000,
        status in arb_status(),
        teacher_idx in proptest::option::of(0usize..3),
    ) -> PaymentFact {
        let teacher = teacher_idx.map(|i| &teachers[i % teachers.len()]);
        fact(
            date(2024, month, day),
            Decimal::new(cents, 2),
            status,
            teacher,
        )
    }
}

fn arb_facts() -> impl Strategy<Value = (Vec<TeacherProfile>, Vec<PaymentFact>)> {
    let teachers = vec![
        teacher("Petrov Ivan", dec!(500)),
        teacher("Sidorova Olga", dec!(700.50)),
        teacher("Kim Irene", dec!(1200)),
    ];
    proptest::collection::vec(arb_fact(teachers.clone()), 0..60)
        .prop_map(move |facts| (teachers.clone(), facts))
}

proptest! {
    /// total_profit is exactly total_payments minus total_teacher_salaries.
    #[test]
    fn prop_profit_identity((roster, facts) in arb_facts()) {
        let report = ReportService::build_report(&roster, &facts);
        prop_assert_eq!(
            report.total_profit,
            report.total_payments - report.total_teacher_salaries
        );
    }

    /// total_payments equals the sum over exactly the paid payments.
    #[test]
    fn prop_total_is_sum_of_paid((roster, facts) in arb_facts()) {
        let report = ReportService::build_report(&roster, &facts);
        let expected: Decimal = facts
            .iter()
            .filter(|f| f.status == PaymentStatus::Paid)
            .map(|f| f.amount)
            .sum();
        prop_assert_eq!(report.total_payments, expected);
    }

    /// Monthly stats are strictly ascending and never contain a month
    /// without a paid payment.
    #[test]
    fn prop_monthly_stats_ordered((_, facts) in arb_facts()) {
        let stats = ReportService::monthly_stats(&facts);
        for pair in stats.windows(2) {
            prop_assert!(pair[0].month < pair[1].month);
        }
        for stat in &stats {
            prop_assert!(stat.count > 0);
        }
    }

    /// Monthly revenues sum to the grand total, and monthly expenses sum to
    /// the total salary cost.
    #[test]
    fn prop_monthly_breakdown_sums_to_totals((_, facts) in arb_facts()) {
        let stats = ReportService::monthly_stats(&facts);
        let revenue: Decimal = stats.iter().map(|s| s.revenue).sum();
        let expenses: Decimal = stats.iter().map(|s| s.expenses).sum();
        prop_assert_eq!(revenue, ReportService::total_paid(&facts));
        prop_assert_eq!(expenses, ReportService::salary_cost(&facts));
    }

    /// Every emitted teacher stat has at least one student, and revenue is
    /// ordered descending.
    #[test]
    fn prop_teacher_stats_nonempty_and_ordered((roster, facts) in arb_facts()) {
        let stats = ReportService::teacher_stats(&roster, &facts);
        for stat in &stats {
            prop_assert!(stat.total_students > 0);
        }
        for pair in stats.windows(2) {
            prop_assert!(pair[0].total_revenue >= pair[1].total_revenue);
        }
    }

    /// Detail rows cover the whole filtered set regardless of status.
    #[test]
    fn prop_detail_rows_cover_all((_, facts) in arb_facts()) {
        let rows = ReportService::detail_rows(&facts);
        prop_assert_eq!(rows.len(), facts.len());
    }
}
