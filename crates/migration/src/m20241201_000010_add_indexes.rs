use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Car: listing filters
        manager
            .create_index(
                Index::create()
                    .name("idx_car_brand")
                    .table(Car::Table)
                    .col(Car::Brand)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_car_price")
                    .table(Car::Table)
                    .col(Car::PricePerDay)
                    .to_owned(),
            )
            .await?;

        // Rental: per-user history and dashboard ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_rental_user")
                    .table(Rental::Table)
                    .col(Rental::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_rental_status_start")
                    .table(Rental::Table)
                    .col(Rental::Status)
                    .col(Rental::StartDate)
                    .to_owned(),
            )
            .await?;

        // Payment / Penalty: lookups by rental
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_rental")
                    .table(Payment::Table)
                    .col(Payment::RentalId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_penalty_rental")
                    .table(Penalty::Table)
                    .col(Penalty::RentalId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_car_brand").table(Car::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_car_price").table(Car::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rental_user").table(Rental::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rental_status_start").table(Rental::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payment_rental").table(Payment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_penalty_rental").table(Penalty::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Car { Table, Brand, PricePerDay }

#[derive(DeriveIden)]
enum Rental { Table, UserId, Status, StartDate }

#[derive(DeriveIden)]
enum Payment { Table, RentalId }

#[derive(DeriveIden)]
enum Penalty { Table, RentalId }
