//! Admin dashboard aggregations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{prelude::DateTimeWithTimeZone, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;

use models::{account, car, payment, penalty, rental, user};
use crate::errors::ServiceError;

pub const DEFAULT_PROFILE_PICTURE: &str = "https://www.inforwaves.com/media/2021/04/dummy-profile-pic-300x300-1.png";
pub const NOT_PAID: &str = "Not Paid";
pub const RECENT_RENTALS_LIMIT: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_cars: u64,
    /// approved rentals
    pub active_rentals: u64,
    pub pending_payments: u64,
    pub penalties: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRental {
    pub id: i32,
    pub car: String,
    pub renter: String,
    pub status: rental::RentalStatus,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTransaction {
    pub id: i32,
    pub profile_picture: String,
    pub name: String,
    pub rental_status: rental::RentalStatus,
    pub payment_status: String,
    pub time_remaining: String,
    pub car: String,
    pub car_image: Option<String>,
}

/// Whole days left until `end`, or `Expired` once it has passed.
pub fn time_remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let left = end - now;
    if left <= chrono::Duration::zero() {
        return "Expired".to_string();
    }
    format!("{} days remaining", left.num_days())
}

pub async fn stats(db: &DatabaseConnection) -> Result<DashboardStats, ServiceError> {
    let total_cars = car::Entity::find().count(db).await?;
    let active_rentals = rental::Entity::find()
        .filter(rental::Column::Status.eq(rental::RentalStatus::Approved))
        .count(db)
        .await?;
    let pending_payments = payment::Entity::find()
        .filter(payment::Column::Status.eq(payment::PaymentStatus::Pending))
        .count(db)
        .await?;
    let penalties = penalty::Entity::find().count(db).await?;
    Ok(DashboardStats { total_cars, active_rentals, pending_payments, penalties })
}

/// Five most recent rentals by start date.
pub async fn recent_rentals(db: &DatabaseConnection) -> Result<Vec<RecentRental>, ServiceError> {
    let rentals = rental::Entity::find()
        .order_by_desc(rental::Column::StartDate)
        .limit(RECENT_RENTALS_LIMIT)
        .all(db)
        .await?;
    let cars = rentals.load_one(car::Entity, db).await?;
    let users = rentals.load_one(user::Entity, db).await?;
    Ok(rentals
        .into_iter()
        .zip(cars)
        .zip(users)
        .map(|((r, c), u)| RecentRental {
            id: r.id,
            car: c.map(|c| c.display_name()).unwrap_or_default(),
            renter: u.map(|u| u.name).unwrap_or_default(),
            status: r.status,
            start_date: r.start_date,
            end_date: r.end_date,
        })
        .collect())
}

/// Pending and approved rentals with renter, payment and countdown details.
pub async fn active_transactions(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<Vec<ActiveTransaction>, ServiceError> {
    let rentals = rental::Entity::find()
        .filter(rental::Column::Status.is_in([rental::RentalStatus::Pending, rental::RentalStatus::Approved]))
        .order_by_asc(rental::Column::EndDate)
        .all(db)
        .await?;
    let cars = rentals.load_one(car::Entity, db).await?;
    let users = rentals.load_one(user::Entity, db).await?;
    let payments = rentals.load_many(payment::Entity, db).await?;

    let user_ids: Vec<i32> = rentals.iter().map(|r| r.user_id).collect();
    let photos: HashMap<i32, String> = account::Entity::find()
        .filter(account::Column::UserId.is_in(user_ids))
        .all(db)
        .await?
        .into_iter()
        .filter_map(|a| a.profile_photo.map(|p| (a.user_id, p)))
        .collect();

    let mut out = Vec::with_capacity(rentals.len());
    for (((r, c), u), ps) in rentals.into_iter().zip(cars).zip(users).zip(payments) {
        out.push(ActiveTransaction {
            id: r.id,
            profile_picture: photos
                .get(&r.user_id)
                .cloned()
                .unwrap_or_else(|| DEFAULT_PROFILE_PICTURE.to_string()),
            name: u.map(|u| u.name).unwrap_or_default(),
            rental_status: r.status,
            payment_status: ps.first().map(|p| p.status.to_string()).unwrap_or_else(|| NOT_PAID.to_string()),
            time_remaining: time_remaining(r.end_date.with_timezone(&Utc), now),
            car: c.as_ref().map(car::Model::display_name).unwrap_or_default(),
            car_image: c.and_then(|c| c.image_url),
        });
    }
    Ok(out)
}
