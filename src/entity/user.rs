//! User entity model for Sea-ORM database interaction.

use sea_orm::entity::prelude::*;

/// Sea-ORM entity model representing a reader.
///
/// # Database Schema
///
/// | Column     | Type               | Description                              |
/// |------------|--------------------|------------------------------------------|
/// | id         | TEXT (Primary Key) | User ID                                  |
/// | email      | TEXT (Unique)      | Login email                              |
/// | timezone   | TEXT               | IANA timezone used for hour bucketing    |
/// | created_at | TIMESTAMPTZ        | Registration timestamp (UTC)             |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    #[sea_orm(unique, column_type = "Text")]
    pub email: String,

    /// Never stored blank; the store substitutes its default timezone.
    #[sea_orm(column_type = "Text")]
    pub timezone: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
