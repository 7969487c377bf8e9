//! Report repository: the payment filter feeding the report service.
//!
//! Produces flat `PaymentFact` rows with course, language, teacher, and
//! customer already resolved, so the aggregation needs no further lookups.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::debug;
use uuid::Uuid;

use lingua_core::report::{PaymentFact, TeacherProfile, TeacherRef};
use lingua_shared::AppError;
use lingua_shared::types::full_name;

use crate::entities::{courses, customers, languages, payments, teachers};

/// Error types for report queries.
#[derive(Debug, thiserror::Error)]
pub enum ReportQueryError {
    /// Start bound is after the end bound.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportQueryError> for AppError {
    fn from(e: ReportQueryError) -> Self {
        let message = e.to_string();
        match e {
            ReportQueryError::InvalidDateRange { .. } => Self::Validation(message),
            ReportQueryError::Database(_) => Self::Database(message),
        }
    }
}

/// Report repository for read-only report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns every payment whose date falls within the inclusive window,
    /// any status, with related records resolved. An absent bound leaves
    /// that side unbounded.
    ///
    /// Rows come back ordered by payment date, then insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if start is after end or a query fails.
    pub async fn payments_in_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<PaymentFact>, ReportQueryError> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(ReportQueryError::InvalidDateRange { start, end });
        }

        let rows = Self::windowed_payments_query(start, end)
            .all(&self.db)
            .await?;

        debug!(count = rows.len(), ?start, ?end, "Fetched payments for report");

        if rows.is_empty() {
            return Ok(vec![]);
        }

        // Resolve courses (with language), teachers, and customers once.
        let course_ids: Vec<Uuid> = rows.iter().map(|p| p.course_id).collect();
        let customer_ids: Vec<Uuid> = rows.iter().map(|p| p.customer_id).collect();

        let course_rows = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .find_also_related(languages::Entity)
            .all(&self.db)
            .await?;

        let teacher_ids: Vec<Uuid> = course_rows
            .iter()
            .filter_map(|(course, _)| course.teacher_id)
            .collect();
        let teacher_map: HashMap<Uuid, teachers::Model> = teachers::Entity::find()
            .filter(teachers::Column::Id.is_in(teacher_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let customer_map: HashMap<Uuid, customers::Model> = customers::Entity::find()
            .filter(customers::Column::Id.is_in(customer_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let course_map: HashMap<Uuid, (courses::Model, Option<languages::Model>)> = course_rows
            .into_iter()
            .map(|(course, language)| (course.id, (course, language)))
            .collect();

        let mut facts = Vec::with_capacity(rows.len());
        for payment in rows {
            // FKs guarantee presence; a missing related record is treated
            // as unassigned rather than failing the whole report.
            let Some((course, language)) = course_map.get(&payment.course_id) else {
                continue;
            };

            let teacher = course
                .teacher_id
                .and_then(|id| teacher_map.get(&id))
                .map(|t| TeacherRef {
                    id: t.id,
                    name: full_name(&t.last_name, &t.first_name),
                    salary: t.salary,
                });

            let customer_name = customer_map
                .get(&payment.customer_id)
                .map(|c| full_name(&c.last_name, &c.first_name))
                .unwrap_or_default();

            facts.push(PaymentFact {
                payment_id: payment.id,
                payment_date: payment.payment_date,
                amount: payment.amount,
                status: payment.status.clone().into(),
                course_id: course.id,
                course_name: course.name.clone(),
                language_name: language.as_ref().map(|l| l.name.clone()).unwrap_or_default(),
                customer_name,
                teacher,
            });
        }

        Ok(facts)
    }

    /// Builds the windowed payment query. Ordering ends with the id column
    /// so rows sharing a payment date and creation timestamp still come
    /// back in a stable order.
    fn windowed_payments_query(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> sea_orm::Select<payments::Entity> {
        let mut query = payments::Entity::find();
        if let Some(start) = start {
            query = query.filter(payments::Column::PaymentDate.gte(start));
        }
        if let Some(end) = end {
            query = query.filter(payments::Column::PaymentDate.lte(end));
        }
        query
            .order_by_asc(payments::Column::PaymentDate)
            .order_by_asc(payments::Column::CreatedAt)
            .order_by_asc(payments::Column::Id)
    }

    /// Enumerates all teachers in insertion order with their owned course
    /// counts. This order is the stable tie-break for teacher statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn teacher_roster(&self) -> Result<Vec<TeacherProfile>, ReportQueryError> {
        let teacher_rows = teachers::Entity::find()
            .order_by_asc(teachers::Column::CreatedAt)
            .order_by_asc(teachers::Column::Id)
            .all(&self.db)
            .await?;

        let mut course_counts: HashMap<Uuid, u64> = HashMap::new();
        for course in courses::Entity::find().all(&self.db).await? {
            if let Some(teacher_id) = course.teacher_id {
                *course_counts.entry(teacher_id).or_default() += 1;
            }
        }

        Ok(teacher_rows
            .into_iter()
            .map(|t| TeacherProfile {
                id: t.id,
                name: full_name(&t.last_name, &t.first_name),
                salary: t.salary,
                courses_count: course_counts.get(&t.id).copied().unwrap_or(0),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // The range check runs before any query, so a disconnected handle is
    // enough to exercise it.
    #[tokio::test]
    async fn test_inverted_range_rejected_before_querying() {
        let repo = ReportRepository::new(DatabaseConnection::Disconnected);
        let result = repo
            .payments_in_range(Some(date(2026, 3, 1)), Some(date(2026, 1, 1)))
            .await;
        assert!(matches!(
            result,
            Err(ReportQueryError::InvalidDateRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_equal_bounds_form_a_valid_single_day_window() {
        let repo = ReportRepository::new(DatabaseConnection::Disconnected);
        let result = repo
            .payments_in_range(Some(date(2026, 1, 15)), Some(date(2026, 1, 15)))
            .await;
        // Passes validation; the disconnected handle fails at query time.
        assert!(matches!(result, Err(ReportQueryError::Database(_))));
    }

    #[test]
    fn test_window_query_orders_by_id_last() {
        use sea_orm::{DbBackend, QueryTrait};

        let sql = ReportRepository::windowed_payments_query(None, None)
            .build(DbBackend::Postgres)
            .to_string();
        let order_by = sql
            .split("ORDER BY")
            .nth(1)
            .expect("query should carry an ORDER BY clause");
        let columns: Vec<&str> = order_by.split(',').collect();
        assert_eq!(columns.len(), 3);
        assert!(columns[0].contains("payment_date"));
        assert!(columns[1].contains("created_at"));
        assert!(columns[2].contains("\"id\""));
    }
}
