//! Create `profile` table with 1:1 FK to `user`.
//!
//! The `kind` column carries the customer/business role; it is set once at
//! registration and the update surface never touches it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(uuid(Profile::Id).primary_key())
                    .col(uuid(Profile::UserId).unique_key().not_null())
                    .col(string_len(Profile::Kind, 20).not_null())
                    .col(
                        ColumnDef::new(Profile::File)
                            .string_len(255)
                            .null(),
                    )
                    .col(string_len(Profile::Location, 255).not_null())
                    .col(string_len(Profile::Tel, 20).not_null())
                    .col(text(Profile::Description).not_null())
                    .col(string_len(Profile::WorkingHours, 100).not_null())
                    .col(timestamp_with_time_zone(Profile::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_user")
                            .from(Profile::Table, Profile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Profile::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Profile { Table, Id, UserId, Kind, File, Location, Tel, Description, WorkingHours, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
