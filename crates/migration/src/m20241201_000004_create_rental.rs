//! Create `rental` table linking `user` and `car` over a date range.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rental::Table)
                    .if_not_exists()
                    .col(pk_auto(Rental::Id))
                    .col(integer(Rental::UserId).not_null())
                    .col(integer(Rental::CarId).not_null())
                    .col(timestamp_with_time_zone(Rental::StartDate).not_null())
                    .col(timestamp_with_time_zone(Rental::EndDate).not_null())
                    .col(string_len(Rental::Status, 16).not_null().default("PENDING"))
                    .col(timestamp_with_time_zone(Rental::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rental_user")
                            .from(Rental::Table, Rental::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rental_car")
                            .from(Rental::Table, Rental::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Rental::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Rental { Table, Id, UserId, CarId, StartDate, EndDate, Status, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Car { Table, Id }
