use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // OfferDetail: one tier of each type per offer
        manager
            .create_index(
                Index::create()
                    .name("uniq_offer_detail_offer_type")
                    .table(OfferDetail::Table)
                    .col(OfferDetail::OfferId)
                    .col(OfferDetail::OfferType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Review: one review per (business, reviewer)
        manager
            .create_index(
                Index::create()
                    .name("uniq_review_business_reviewer")
                    .table(Review::Table)
                    .col(Review::BusinessId)
                    .col(Review::ReviewerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Offer: creator lookup and default list ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_offer_creator")
                    .table(Offer::Table)
                    .col(Offer::CreatorId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_offer_created_at")
                    .table(Offer::Table)
                    .col(Offer::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Orders: participant scoping and per-business status counts
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_customer")
                    .table(Orders::Table)
                    .col(Orders::CustomerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_business_status")
                    .table(Orders::Table)
                    .col(Orders::BusinessId)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_offer_detail_offer_type").table(OfferDetail::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_review_business_reviewer").table(Review::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_offer_creator").table(Offer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_offer_created_at").table(Offer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_customer").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_business_status").table(Orders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Offer { Table, CreatorId, CreatedAt }

#[derive(DeriveIden)]
enum OfferDetail { Table, OfferId, OfferType }

#[derive(DeriveIden)]
enum Orders { Table, CustomerId, BusinessId, Status }

#[derive(DeriveIden)]
enum Review { Table, BusinessId, ReviewerId }
