//! Create `car` table.
//!
//! `user_id` points at the current renter and is cleared when the car is released.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(pk_auto(Car::Id))
                    .col(string_len(Car::Brand, 64).not_null())
                    .col(string_len(Car::Model, 128).not_null())
                    .col(double(Car::PricePerDay).not_null())
                    .col(boolean(Car::Availability).not_null().default(true))
                    .col(text_null(Car::ImageUrl))
                    .col(text_null(Car::Description))
                    .col(string_len(Car::OwnerName, 128).not_null())
                    .col(string_len_null(Car::OwnerPhone, 32))
                    .col(double_null(Car::Rating))
                    .col(integer_null(Car::UserId))
                    .col(timestamp_with_time_zone(Car::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Car::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_renter")
                            .from(Car::Table, Car::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Car::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Car {
    Table,
    Id,
    Brand,
    Model,
    PricePerDay,
    Availability,
    ImageUrl,
    Description,
    OwnerName,
    OwnerPhone,
    Rating,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
