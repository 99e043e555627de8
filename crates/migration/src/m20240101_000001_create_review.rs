//! Create `review` table.
//! One row per review of a point of sale; approval columns stay null until approved.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(big_integer(Review::Id).auto_increment().primary_key())
                    .col(big_integer(Review::PosId))
                    .col(big_integer(Review::AuthorId))
                    .col(text(Review::Review))
                    .col(boolean_null(Review::Approved))
                    .col(big_integer_null(Review::ApprovedBy))
                    .col(timestamp_with_time_zone(Review::CreatedAt))
                    .col(timestamp_with_time_zone(Review::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum Review {
    Table,
    Id,
    PosId,
    AuthorId,
    Review,
    Approved,
    ApprovedBy,
    CreatedAt,
    UpdatedAt,
}
