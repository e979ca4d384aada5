//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for pintrack:
//!
//! - `users`: PIN-identified accounts (unique pin index)
//! - `trackers`: budget containers owned by users
//! - `expenses`: dated, categorized records owned by trackers
//!
//! Both foreign keys cascade on delete, so removing a tracker removes its
//! expenses at the schema level.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Pin,
    PreferredCurrency,
    CreatedAt,
}

#[derive(Iden)]
enum Trackers {
    Table,
    Id,
    UserId,
    Name,
    Currency,
    CreatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    TrackerId,
    AmountCents,
    Category,
    Description,
    Date,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Pin).string().not_null())
                    .col(
                        ColumnDef::new(Users::PreferredCurrency)
                            .string()
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // PIN uniqueness is enforced here rather than by check-then-insert
        // alone, so a racing duplicate registration fails at the index.
        manager
            .create_index(
                Index::create()
                    .name("idx-users-pin-unique")
                    .table(Users::Table)
                    .col(Users::Pin)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Trackers
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Trackers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trackers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trackers::UserId).string().not_null())
                    .col(ColumnDef::new(Trackers::Name).string().not_null())
                    .col(
                        ColumnDef::new(Trackers::Currency)
                            .string()
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(Trackers::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trackers-user_id")
                            .from(Trackers::Table, Trackers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-trackers-user_id-created_at")
                    .table(Trackers::Table)
                    .col(Trackers::UserId)
                    .col(Trackers::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::TrackerId).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-tracker_id")
                            .from(Expenses::Table, Expenses::TrackerId)
                            .to(Trackers::Table, Trackers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-tracker_id-date")
                    .table(Expenses::Table)
                    .col(Expenses::TrackerId)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trackers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
