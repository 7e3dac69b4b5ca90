//! Create `penalty` table: fees assessed against a rental (late return, damage, ...).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Penalty::Table)
                    .if_not_exists()
                    .col(pk_auto(Penalty::Id))
                    .col(integer(Penalty::RentalId).not_null())
                    .col(string_len(Penalty::PenaltyType, 32).not_null())
                    .col(double(Penalty::Amount).not_null())
                    .col(text(Penalty::Reason).not_null())
                    .col(timestamp_with_time_zone(Penalty::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_penalty_rental")
                            .from(Penalty::Table, Penalty::RentalId)
                            .to(Rental::Table, Rental::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Penalty::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Penalty { Table, Id, RentalId, PenaltyType, Amount, Reason, CreatedAt }

#[derive(DeriveIden)]
enum Rental { Table, Id }
