//! Book entity model for Sea-ORM database interaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a book on a reader's shelf.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookStatus {
    #[default]
    #[sea_orm(string_value = "READING")]
    Reading,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "PAUSED")]
    Paused,
    #[sea_orm(string_value = "DROPPED")]
    Dropped,
    #[sea_orm(string_value = "WISHLIST")]
    Wishlist,
}

/// Sea-ORM entity model representing a book owned by one user.
///
/// # Database Schema
///
/// | Column      | Type               | Description                          |
/// |-------------|--------------------|--------------------------------------|
/// | id          | TEXT (Primary Key) | Book ID                              |
/// | user_id     | TEXT (FK users)    | Owner                                |
/// | title       | TEXT               | Title, 1 to 200 characters           |
/// | author      | TEXT               | Author, 1 to 200 characters          |
/// | total_pages | INTEGER            | Page count, at least 1               |
/// | status      | VARCHAR(16)        | One of [`BookStatus`]                |
/// | created_at  | TIMESTAMPTZ        | Creation timestamp (UTC)             |
/// | updated_at  | TIMESTAMPTZ        | Last modification timestamp (UTC)    |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "books")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub user_id: String,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub author: String,

    pub total_pages: i32,

    pub status: BookStatus,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::reading_session::Entity")]
    ReadingSession,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::reading_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
