use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_review::Review;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Review: lookups by point of sale and approval state
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_review_pos_approved")
                    .table(Review::Table)
                    .col(Review::PosId)
                    .col(Review::Approved)
                    .to_owned(),
            )
            .await?;

        // Review: author history
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_review_author")
                    .table(Review::Table)
                    .col(Review::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_review_author").table(Review::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_review_pos_approved").table(Review::Table).to_owned())
            .await
    }
}
