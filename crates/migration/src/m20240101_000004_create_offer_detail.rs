//! Create `offer_detail` table: the three price tiers of an offer.
//!
//! Uniqueness of (offer_id, offer_type) is enforced by the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OfferDetail::Table)
                    .if_not_exists()
                    .col(uuid(OfferDetail::Id).primary_key())
                    .col(uuid(OfferDetail::OfferId).not_null())
                    .col(string_len(OfferDetail::Title, 255).not_null())
                    .col(integer(OfferDetail::Revisions).not_null())
                    .col(integer(OfferDetail::DeliveryTimeInDays).not_null())
                    .col(decimal_len(OfferDetail::Price, 10, 2).not_null())
                    .col(json(OfferDetail::Features).not_null())
                    .col(string_len(OfferDetail::OfferType, 20).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offer_detail_offer")
                            .from(OfferDetail::Table, OfferDetail::OfferId)
                            .to(Offer::Table, Offer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OfferDetail::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OfferDetail { Table, Id, OfferId, Title, Revisions, DeliveryTimeInDays, Price, Features, OfferType }

#[derive(DeriveIden)]
enum Offer { Table, Id }
