//! Create `review` table.
//!
//! One review per (business, reviewer) pair; the unique constraint lives in
//! the index migration.
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
                    .col(uuid(Review::Id).primary_key())
                    .col(uuid(Review::BusinessId).not_null())
                    .col(uuid(Review::ReviewerId).not_null())
                    .col(integer(Review::Rating).not_null())
                    .col(text(Review::Description).not_null())
                    .col(timestamp_with_time_zone(Review::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Review::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_business")
                            .from(Review::Table, Review::BusinessId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_reviewer")
                            .from(Review::Table, Review::ReviewerId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Review { Table, Id, BusinessId, ReviewerId, Rating, Description, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Profile { Table, Id }
