//! Payment and transaction listings for administrators.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, EntityTrait, LoaderTrait, QueryOrder};
use serde::Serialize;

use models::{car, payment, rental, user};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalDetail {
    #[serde(flatten)]
    pub rental: rental::Model,
    pub car: Option<car::Model>,
    pub user: Option<user::Model>,
}

/// Payment with the rental it settles, its car and its renter
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    #[serde(flatten)]
    pub payment: payment::Model,
    pub rental: Option<RentalDetail>,
}

pub async fn payment_info(db: &DatabaseConnection) -> Result<Vec<PaymentDetail>, ServiceError> {
    let payments = payment::Entity::find()
        .order_by_desc(payment::Column::PaymentDate)
        .all(db)
        .await?;
    let rentals: Vec<rental::Model> = payments
        .load_one(rental::Entity, db)
        .await?
        .into_iter()
        .flatten()
        .collect();
    let cars = rentals.load_one(car::Entity, db).await?;
    let users = rentals.load_one(user::Entity, db).await?;

    let by_id: HashMap<i32, RentalDetail> = rentals
        .into_iter()
        .zip(cars)
        .zip(users)
        .map(|((r, car), user)| (r.id, RentalDetail { rental: r, car, user }))
        .collect();

    // several payments may settle one rental
    Ok(payments
        .into_iter()
        .map(|p| {
            let rental = by_id.get(&p.rental_id).cloned();
            PaymentDetail { payment: p, rental }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_car, seed_user};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn payments_carry_rental_car_and_user() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(payment_info(&db).await?.is_empty());

        let u = seed_user(&db, "Gita", "gita@example.com", user::Role::User).await?;
        let c = seed_car(&db, "Mazda", "CX-5", 900_000.0, Some(4.9)).await?;
        let now = Utc::now();
        let r = rental::create(&db, u.id, c.id, now.into(), (now + Duration::days(2)).into(), rental::RentalStatus::Approved).await?;
        payment::create(&db, r.id, 900_000.0, payment::PaymentMethod::Bank, payment::PaymentStatus::Paid).await?;
        payment::create(&db, r.id, 900_000.0, payment::PaymentMethod::Ewallet, payment::PaymentStatus::Pending).await?;

        let info = payment_info(&db).await?;
        assert_eq!(info.len(), 2);
        for p in &info {
            let rental = p.rental.as_ref().expect("rental");
            assert_eq!(rental.rental.id, r.id);
            assert_eq!(rental.car.as_ref().map(|c| c.id), Some(c.id));
            assert_eq!(rental.user.as_ref().map(|u| u.email.as_str()), Some("gita@example.com"));
        }
        let json = serde_json::to_value(&info[0])?;
        assert!(json["rental"]["user"].get("passwordHash").is_none());
        assert!(json.get("rentalId").is_some());
        Ok(())
    }
}
