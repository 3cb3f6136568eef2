//! Create `orders` table.
//!
//! The FK to `offer_detail` is RESTRICT: a tier that has been ordered can
//! never be deleted out from under its orders. The snapshot columns are
//! copied from the tier at order creation and never rewritten.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(uuid(Orders::Id).primary_key())
                    .col(uuid(Orders::OfferDetailId).not_null())
                    .col(uuid(Orders::CustomerId).not_null())
                    .col(uuid(Orders::BusinessId).not_null())
                    .col(string_len(Orders::Status, 20).not_null())
                    .col(string_len(Orders::Title, 255).not_null())
                    .col(integer(Orders::Revisions).not_null())
                    .col(integer(Orders::DeliveryTimeInDays).not_null())
                    .col(decimal_len(Orders::Price, 10, 2).not_null())
                    .col(json(Orders::Features).not_null())
                    .col(string_len(Orders::OfferType, 20).not_null())
                    .col(timestamp_with_time_zone(Orders::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Orders::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_offer_detail")
                            .from(Orders::Table, Orders::OfferDetailId)
                            .to(OfferDetail::Table, OfferDetail::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_customer")
                            .from(Orders::Table, Orders::CustomerId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_business")
                            .from(Orders::Table, Orders::BusinessId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Orders::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Orders { Table, Id, OfferDetailId, CustomerId, BusinessId, Status, Title, Revisions, DeliveryTimeInDays, Price, Features, OfferType, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum OfferDetail { Table, Id }

#[derive(DeriveIden)]
enum Profile { Table, Id }
