use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_catalog::{Members, Products};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Foreign keys are declared inline: SQLite cannot add them after the fact.
        manager
            .create_table(
                Table::create()
                    .table(Wishes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Wishes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Wishes::MemberId).uuid().not_null())
                    .col(ColumnDef::new(Wishes::ProductId).uuid().not_null())
                    .col(ColumnDef::new(Wishes::Quantity).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(Wishes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wishes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishes_member")
                            .from(Wishes::Table, Wishes::MemberId)
                            .to(Members::Table, Members::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishes_product")
                            .from(Wishes::Table, Wishes::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_wishes_member_product")
                    .table(Wishes::Table)
                    .col(Wishes::MemberId)
                    .col(Wishes::ProductId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_wishes_product")
                    .table(Wishes::Table)
                    .col(Wishes::ProductId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Wishes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Wishes {
    Table,
    Id,
    MemberId,
    ProductId,
    Quantity,
    CreatedAt,
    UpdatedAt,
}
