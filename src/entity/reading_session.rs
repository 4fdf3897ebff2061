//! Reading session entity model for Sea-ORM database interaction.

use sea_orm::entity::prelude::*;

/// Sea-ORM entity model representing one recorded reading session.
///
/// Rows are written once by [`crate::SeaOrmStore`] and never updated.
///
/// # Database Schema
///
/// | Column           | Type               | Description                        |
/// |------------------|--------------------|------------------------------------|
/// | id               | TEXT (Primary Key) | Session ID                         |
/// | book_id          | TEXT (FK books)    | Book the session belongs to        |
/// | start_page       | INTEGER            | First page read                    |
/// | end_page         | INTEGER            | Page the reader stopped at         |
/// | start_time       | TIMESTAMPTZ        | Session start (UTC)                |
/// | end_time         | TIMESTAMPTZ        | Session end (UTC)                  |
/// | duration_seconds | BIGINT             | Derived, whole seconds             |
/// | pages_read       | INTEGER            | Derived, `end_page - start_page`   |
/// | created_at       | TIMESTAMPTZ        | Insert timestamp (UTC)             |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reading_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub book_id: String,

    pub start_page: i32,

    pub end_page: i32,

    pub start_time: DateTimeWithTimeZone,

    pub end_time: DateTimeWithTimeZone,

    pub duration_seconds: i64,

    pub pages_read: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_delete = "Cascade"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
