//! Create `payment` table; each row belongs to one rental.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::RentalId).not_null())
                    .col(double(Payment::Amount).not_null())
                    .col(string_len(Payment::Method, 16).not_null())
                    .col(string_len(Payment::Status, 16).not_null().default("PENDING"))
                    .col(timestamp_with_time_zone(Payment::PaymentDate).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_rental")
                            .from(Payment::Table, Payment::RentalId)
                            .to(Rental::Table, Rental::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payment { Table, Id, RentalId, Amount, Method, Status, PaymentDate }

#[derive(DeriveIden)]
enum Rental { Table, Id }
