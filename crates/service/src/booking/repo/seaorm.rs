use chrono::Utc;
use sea_orm::{sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, TransactionTrait};
use tracing::debug;

use models::{car, payment, rental};
use crate::booking::domain::{BookingReceipt, CarAvailability, NewBooking};
use crate::booking::errors::BookingError;
use crate::booking::repository::BookingRepository;

pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_car(&self, car_id: i32) -> Result<Option<CarAvailability>, BookingError> {
        let row: Option<(i32, bool)> = car::Entity::find_by_id(car_id)
            .select_only()
            .column(car::Column::Id)
            .column(car::Column::Availability)
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(row.map(|(id, available)| CarAvailability { id, available }))
    }

    async fn commit_booking(&self, booking: NewBooking) -> Result<BookingReceipt, BookingError> {
        let txn = self.db.begin().await?;

        // 条件更新：只有仍可租的车会被翻转，并发预订中只有一个能成功
        let flipped = car::Entity::update_many()
            .col_expr(car::Column::Availability, Expr::value(false))
            .col_expr(car::Column::UserId, Expr::value(booking.user_id))
            .col_expr(car::Column::UpdatedAt, Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())))
            .filter(car::Column::Id.eq(booking.car_id))
            .filter(car::Column::Availability.eq(true))
            .exec(&txn)
            .await?;
        if flipped.rows_affected != 1 {
            debug!(car_id = booking.car_id, "guarded availability update matched no row");
            txn.rollback().await?;
            return Err(BookingError::CarUnavailable(booking.car_id));
        }

        let rental = rental::create(
            &txn,
            booking.user_id,
            booking.car_id,
            booking.start_date,
            booking.end_date,
            rental::RentalStatus::Approved,
        )
        .await?;
        let payment = payment::create(&txn, rental.id, booking.amount, booking.method, payment::PaymentStatus::Paid).await?;

        txn.commit().await?;
        Ok(BookingReceipt { rental, payment })
    }
}
