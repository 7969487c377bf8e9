//! `SeaORM` entity definitions.

pub mod courses;
pub mod customers;
pub mod languages;
pub mod payments;
pub mod sea_orm_active_enums;
pub mod teacher_languages;
pub mod teachers;
