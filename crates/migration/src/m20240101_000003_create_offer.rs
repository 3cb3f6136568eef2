//! Create `offer` table owned by a business profile.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offer::Table)
                    .if_not_exists()
                    .col(uuid(Offer::Id).primary_key())
                    .col(uuid(Offer::CreatorId).not_null())
                    .col(string_len(Offer::Title, 255).not_null())
                    .col(
                        ColumnDef::new(Offer::Image)
                            .string_len(255)
                            .null(),
                    )
                    .col(text(Offer::Description).not_null())
                    .col(timestamp_with_time_zone(Offer::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Offer::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offer_creator")
                            .from(Offer::Table, Offer::CreatorId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Offer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Offer { Table, Id, CreatorId, Title, Image, Description, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Profile { Table, Id }
