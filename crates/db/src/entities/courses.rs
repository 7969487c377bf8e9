//! `SeaORM` Entity for the courses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    /// Course price, NUMERIC(10,2). Payments may differ from it.
    pub price: Decimal,
    pub notes: String,
    pub language_id: Uuid,
    /// Owning teacher; NULL means unassigned.
    pub teacher_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::languages::Entity",
        from = "Column::LanguageId",
        to = "super::languages::Column::Id"
    )]
    Languages,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teachers,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Languages.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teachers.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        super::payments::Relation::Customers.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::payments::Relation::Courses.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
