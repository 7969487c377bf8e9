//! Initial database migration.
//!
//! Creates the payment status enum, all core tables, and the updated_at
//! trigger function.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: PEOPLE
        // ============================================================
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(TEACHERS_SQL).await?;

        // ============================================================
        // PART 3: CURRICULUM
        // ============================================================
        db.execute_unprepared(LANGUAGES_SQL).await?;
        db.execute_unprepared(COURSES_SQL).await?;
        db.execute_unprepared(TEACHER_LANGUAGES_SQL).await?;

        // ============================================================
        // PART 4: PAYMENTS
        // ============================================================
        db.execute_unprepared(PAYMENTS_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Payment lifecycle
CREATE TYPE payment_status AS ENUM (
    'pending',
    'paid',
    'failed',
    'refunded'
);
";

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    last_name VARCHAR(50) NOT NULL,
    first_name VARCHAR(50) NOT NULL,
    middle_name VARCHAR(50),
    phone_number VARCHAR(30) NOT NULL UNIQUE,
    sex BOOLEAN NOT NULL,
    birth_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TEACHERS_SQL: &str = r"
CREATE TABLE teachers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    last_name VARCHAR(50) NOT NULL,
    first_name VARCHAR(50) NOT NULL,
    middle_name VARCHAR(50),
    phone_number VARCHAR(30) NOT NULL UNIQUE,
    sex BOOLEAN NOT NULL,
    birth_date DATE NOT NULL,
    salary NUMERIC(10,2) NOT NULL CHECK (salary >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const LANGUAGES_SQL: &str = r"
CREATE TABLE languages (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(30) NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const COURSES_SQL: &str = r"
CREATE TABLE courses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    price NUMERIC(10,2) NOT NULL CHECK (price >= 0),
    notes TEXT NOT NULL DEFAULT '',
    language_id UUID NOT NULL REFERENCES languages(id) ON DELETE CASCADE,
    -- Owning teacher is optional: courses may be unassigned.
    teacher_id UUID REFERENCES teachers(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (end_date >= start_date)
);

CREATE INDEX idx_courses_language ON courses(language_id);
CREATE INDEX idx_courses_teacher ON courses(teacher_id);
";

const TEACHER_LANGUAGES_SQL: &str = r"
CREATE TABLE teacher_languages (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    teacher_id UUID NOT NULL REFERENCES teachers(id) ON DELETE CASCADE,
    language_id UUID NOT NULL REFERENCES languages(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (teacher_id, language_id)
);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    customer_id UUID NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
    course_id UUID NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
    payment_date DATE NOT NULL,
    amount NUMERIC(10,2) NOT NULL CHECK (amount >= 0),
    status payment_status NOT NULL,
    grade INTEGER CHECK (grade >= 0 AND grade <= 100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- One payment record per customer, course, and date.
    UNIQUE (customer_id, course_id, payment_date)
);

CREATE INDEX idx_payments_date ON payments(payment_date);
CREATE INDEX idx_payments_customer ON payments(customer_id);
CREATE INDEX idx_payments_course ON payments(course_id);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_customers_updated_at
    BEFORE UPDATE ON customers
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_teachers_updated_at
    BEFORE UPDATE ON teachers
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_languages_updated_at
    BEFORE UPDATE ON languages
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_courses_updated_at
    BEFORE UPDATE ON courses
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_payments_updated_at
    BEFORE UPDATE ON payments
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS payments CASCADE;
DROP TABLE IF EXISTS teacher_languages CASCADE;
DROP TABLE IF EXISTS courses CASCADE;
DROP TABLE IF EXISTS languages CASCADE;
DROP TABLE IF EXISTS teachers CASCADE;
DROP TABLE IF EXISTS customers CASCADE;
DROP TYPE IF EXISTS payment_status;
DROP FUNCTION IF EXISTS set_updated_at;
";
