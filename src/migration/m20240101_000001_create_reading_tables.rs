use sea_orm_migration::prelude::*;

use crate::timezone::DEFAULT_TIMEZONE;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).text().not_null().unique_key())
                    .col(
                        ColumnDef::new(Users::Timezone)
                            .text()
                            .not_null()
                            .default(DEFAULT_TIMEZONE),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Books::Id).text().not_null().primary_key())
                    .col(ColumnDef::new(Books::UserId).text().not_null())
                    .col(ColumnDef::new(Books::Title).text().not_null())
                    .col(ColumnDef::new(Books::Author).text().not_null())
                    .col(ColumnDef::new(Books::TotalPages).integer().not_null())
                    .col(ColumnDef::new(Books::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Books::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Books::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_books_user_id")
                            .from(Books::Table, Books::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReadingSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReadingSessions::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReadingSessions::BookId).text().not_null())
                    .col(ColumnDef::new(ReadingSessions::StartPage).integer().not_null())
                    .col(ColumnDef::new(ReadingSessions::EndPage).integer().not_null())
                    .col(
                        ColumnDef::new(ReadingSessions::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReadingSessions::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReadingSessions::DurationSeconds)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReadingSessions::PagesRead).integer().not_null())
                    .col(
                        ColumnDef::new(ReadingSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_sessions_book_id")
                            .from(ReadingSessions::Table, ReadingSessions::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Analytics scans sessions by book and start time.
        manager
            .create_index(
                Index::create()
                    .name("idx_reading_sessions_book_start")
                    .table(ReadingSessions::Table)
                    .col(ReadingSessions::BookId)
                    .col(ReadingSessions::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_books_user_id")
                    .table(Books::Table)
                    .col(Books::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReadingSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Timezone,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Id,
    UserId,
    Title,
    Author,
    TotalPages,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ReadingSessions {
    Table,
    Id,
    BookId,
    StartPage,
    EndPage,
    StartTime,
    EndTime,
    DurationSeconds,
    PagesRead,
    CreatedAt,
}
