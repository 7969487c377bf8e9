//! Database seeder for Lingua development and testing.
//!
//! Seeds languages, teachers, customers, courses, and a couple of months of
//! payments for local development. Safe to run repeatedly: existing rows are
//! skipped by their fixed ids or unique keys.
//!
//! Usage: cargo run --bin seeder

use chrono::{NaiveDate, Utc};
use lingua_db::entities::{
    courses, customers, languages, payments, sea_orm_active_enums::PaymentStatus,
    teacher_languages, teachers,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::str::FromStr;
use uuid::Uuid;

/// Fixed ids so reruns find and skip the existing rows.
const ENGLISH_ID: &str = "00000000-0000-0000-0000-000000000101";
const GERMAN_ID: &str = "00000000-0000-0000-0000-000000000102";
const TEACHER_PETROV_ID: &str = "00000000-0000-0000-0000-000000000201";
const TEACHER_MUELLER_ID: &str = "00000000-0000-0000-0000-000000000202";
const CUSTOMER_IDS: [&str; 3] = [
    "00000000-0000-0000-0000-000000000301",
    "00000000-0000-0000-0000-000000000302",
    "00000000-0000-0000-0000-000000000303",
];
const COURSE_ENGLISH_ID: &str = "00000000-0000-0000-0000-000000000401";
const COURSE_GERMAN_ID: &str = "00000000-0000-0000-0000-000000000402";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = lingua_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding languages...");
    seed_languages(&db).await;

    println!("Seeding teachers...");
    seed_teachers(&db).await;

    println!("Seeding customers...");
    seed_customers(&db).await;

    println!("Seeding courses...");
    seed_courses(&db).await;

    println!("Seeding payments...");
    seed_payments(&db).await;

    println!("Seeding complete!");
}

fn id(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap()
}

fn money(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn exists<E: EntityTrait>(db: &DatabaseConnection, row_id: Uuid) -> bool
where
    Uuid: Into<<E::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(row_id).one(db).await.ok().flatten().is_some()
}

async fn seed_languages(db: &DatabaseConnection) {
    let rows = [(ENGLISH_ID, "English"), (GERMAN_ID, "German")];

    for (row_id, name) in rows {
        if exists::<languages::Entity>(db, id(row_id)).await {
            println!("  Language {name} already exists, skipping...");
            continue;
        }

        let language = languages::ActiveModel {
            id: Set(id(row_id)),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = language.insert(db).await {
            eprintln!("Failed to insert language {name}: {e}");
        } else {
            println!("  Created language: {name}");
        }
    }
}

async fn seed_teachers(db: &DatabaseConnection) {
    let rows = [
        (
            TEACHER_PETROV_ID,
            "Petrov",
            "Ivan",
            Some("Sergeevich"),
            "+7-900-000-0001",
            true,
            date(1985, 4, 12),
            "500.00",
            ENGLISH_ID,
        ),
        (
            TEACHER_MUELLER_ID,
            "Mueller",
            "Anna",
            None,
            "+49-170-000-0002",
            false,
            date(1990, 9, 3),
            "450.00",
            GERMAN_ID,
        ),
    ];

    for (row_id, last, first, middle, phone, sex, birth, salary, language_id) in rows {
        if exists::<teachers::Entity>(db, id(row_id)).await {
            println!("  Teacher {last} already exists, skipping...");
            continue;
        }

        let teacher = teachers::ActiveModel {
            id: Set(id(row_id)),
            last_name: Set(last.to_string()),
            first_name: Set(first.to_string()),
            middle_name: Set(middle.map(str::to_string)),
            phone_number: Set(phone.to_string()),
            sex: Set(sex),
            birth_date: Set(birth),
            salary: Set(money(salary)),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = teacher.insert(db).await {
            eprintln!("Failed to insert teacher {last}: {e}");
            continue;
        }
        println!("  Created teacher: {last} {first}");

        let link = teacher_languages::ActiveModel {
            id: Set(Uuid::new_v4()),
            teacher_id: Set(id(row_id)),
            language_id: Set(id(language_id)),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = link.insert(db).await {
            // Unique (teacher, language) pair may already be present
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to link teacher {last} to language: {e}");
            }
        }
    }
}

async fn seed_customers(db: &DatabaseConnection) {
    let rows = [
        (
            CUSTOMER_IDS[0],
            "Smirnova",
            "Olga",
            "+7-900-000-0101",
            false,
            date(1998, 1, 20),
        ),
        (
            CUSTOMER_IDS[1],
            "Ivanov",
            "Dmitry",
            "+7-900-000-0102",
            true,
            date(2001, 6, 15),
        ),
        (
            CUSTOMER_IDS[2],
            "Karpova",
            "Elena",
            "+7-900-000-0103",
            false,
            date(1995, 11, 2),
        ),
    ];

    for (row_id, last, first, phone, sex, birth) in rows {
        if exists::<customers::Entity>(db, id(row_id)).await {
            println!("  Customer {last} already exists, skipping...");
            continue;
        }

        let customer = customers::ActiveModel {
            id: Set(id(row_id)),
            last_name: Set(last.to_string()),
            first_name: Set(first.to_string()),
            middle_name: Set(None),
            phone_number: Set(phone.to_string()),
            sex: Set(sex),
            birth_date: Set(birth),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = customer.insert(db).await {
            eprintln!("Failed to insert customer {last}: {e}");
        } else {
            println!("  Created customer: {last} {first}");
        }
    }
}

async fn seed_courses(db: &DatabaseConnection) {
    let rows = [
        (
            COURSE_ENGLISH_ID,
            "English B1 Evening",
            date(2026, 1, 12),
            date(2026, 6, 26),
            "120.00",
            ENGLISH_ID,
            Some(TEACHER_PETROV_ID),
        ),
        (
            COURSE_GERMAN_ID,
            "German A2 Intensive",
            date(2026, 2, 2),
            date(2026, 5, 29),
            "150.00",
            GERMAN_ID,
            Some(TEACHER_MUELLER_ID),
        ),
    ];

    for (row_id, name, start, end, price, language_id, teacher_id) in rows {
        if exists::<courses::Entity>(db, id(row_id)).await {
            println!("  Course {name} already exists, skipping...");
            continue;
        }

        let course = courses::ActiveModel {
            id: Set(id(row_id)),
            name: Set(name.to_string()),
            start_date: Set(start),
            end_date: Set(end),
            price: Set(money(price)),
            notes: Set(String::new()),
            language_id: Set(id(language_id)),
            teacher_id: Set(teacher_id.map(id)),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = course.insert(db).await {
            eprintln!("Failed to insert course {name}: {e}");
        } else {
            println!("  Created course: {name}");
        }
    }
}

/// Seeds payments across two months so the financial report has something
/// to aggregate: paid rows drive revenue, one pending row shows up only in
/// the detail listing.
async fn seed_payments(db: &DatabaseConnection) {
    let rows = [
        (
            CUSTOMER_IDS[0],
            COURSE_ENGLISH_ID,
            date(2026, 1, 15),
            "120.00",
            PaymentStatus::Paid,
            Some(87),
        ),
        (
            CUSTOMER_IDS[1],
            COURSE_ENGLISH_ID,
            date(2026, 1, 18),
            "120.00",
            PaymentStatus::Paid,
            None,
        ),
        (
            CUSTOMER_IDS[0],
            COURSE_ENGLISH_ID,
            date(2026, 2, 15),
            "120.00",
            PaymentStatus::Paid,
            None,
        ),
        (
            CUSTOMER_IDS[2],
            COURSE_GERMAN_ID,
            date(2026, 2, 10),
            "150.00",
            PaymentStatus::Paid,
            Some(92),
        ),
        (
            CUSTOMER_IDS[1],
            COURSE_GERMAN_ID,
            date(2026, 2, 20),
            "150.00",
            PaymentStatus::Pending,
            None,
        ),
    ];

    let mut inserted = 0;
    for (customer_id, course_id, payment_date, amount, status, grade) in rows {
        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(id(customer_id)),
            course_id: Set(id(course_id)),
            payment_date: Set(payment_date),
            amount: Set(money(amount)),
            status: Set(status),
            grade: Set(grade),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = payment.insert(db).await {
            // Unique (customer, course, payment_date) makes reruns a no-op
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to insert payment: {e}");
            }
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} payments");
}
