//! `SeaORM` Entity for the teachers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub sex: bool,
    pub birth_date: Date,
    /// Monthly salary, NUMERIC(10,2).
    pub salary: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
    #[sea_orm(has_many = "super::teacher_languages::Entity")]
    TeacherLanguages,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        super::teacher_languages::Relation::Languages.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::teacher_languages::Relation::Teachers.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
