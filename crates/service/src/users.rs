//! User-facing reads: admin user listing, account profile, personal info and rental history.

use sea_orm::{prelude::DateTimeWithTimeZone, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use models::{account, car, payment, penalty, rental, user};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithAccount {
    #[serde(flatten)]
    pub user: user::Model,
    pub account: Option<account::Model>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub phone: Option<String>,
    pub id_card_number: Option<String>,
    pub address: Option<String>,
    pub id_card_photo: Option<String>,
    pub profile_photo: Option<String>,
}

impl From<account::Model> for AccountInfo {
    fn from(a: account::Model) -> Self {
        Self {
            phone: a.phone,
            id_card_number: a.id_card_number,
            address: a.address,
            id_card_photo: a.id_card_photo,
            profile_photo: a.profile_photo,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub account_info: Vec<AccountInfo>,
}

/// Account together with its owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(flatten)]
    pub account: account::Model,
    pub user: user::Model,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCar {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub price_per_day: f64,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub owner_name: String,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLine {
    pub payment_id: i32,
    pub amount: f64,
    pub method: payment::PaymentMethod,
    pub status: payment::PaymentStatus,
    pub payment_date: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyLine {
    pub penalty_id: i32,
    #[serde(rename = "type")]
    pub penalty_type: String,
    pub amount: f64,
    pub reason: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalHistory {
    pub rental_id: i32,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub status: rental::RentalStatus,
    pub car: Option<RentalCar>,
    pub payments: Vec<PaymentLine>,
    pub penalties: Vec<PenaltyLine>,
}

/// List all users with their account.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<UserWithAccount>, ServiceError> {
    let users = user::Entity::find().order_by_asc(user::Column::Id).all(db).await?;
    let accounts = users.load_one(account::Entity, db).await?;
    Ok(users
        .into_iter()
        .zip(accounts)
        .map(|(user, account)| UserWithAccount { user, account })
        .collect())
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<UserWithAccount, ServiceError> {
    let user = user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    let account = account::find_by_user(db, user.id).await?;
    Ok(UserWithAccount { user, account })
}

pub async fn user_info(db: &DatabaseConnection, user_id: i32) -> Result<UserInfo, ServiceError> {
    let found = get_user(db, user_id).await?;
    Ok(UserInfo {
        name: found.user.name,
        email: found.user.email,
        account_info: found.account.into_iter().map(AccountInfo::from).collect(),
    })
}

/// The caller's account; `NotFound` until a profile exists.
pub async fn account_profile(db: &DatabaseConnection, user_id: i32) -> Result<AccountProfile, ServiceError> {
    let account = account::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("account"))?;
    let user = user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    Ok(AccountProfile { account, user })
}

/// Rental history of one user with car, payments and penalties.
pub async fn user_rentals(db: &DatabaseConnection, user_id: i32) -> Result<Vec<RentalHistory>, ServiceError> {
    let rentals = rental::Entity::find()
        .filter(rental::Column::UserId.eq(user_id))
        .order_by_desc(rental::Column::StartDate)
        .all(db)
        .await?;
    let cars = rentals.load_one(car::Entity, db).await?;
    let payments = rentals.load_many(payment::Entity, db).await?;
    let penalties = rentals.load_many(penalty::Entity, db).await?;

    let mut out = Vec::with_capacity(rentals.len());
    for (((r, c), ps), pens) in rentals.into_iter().zip(cars).zip(payments).zip(penalties) {
        out.push(RentalHistory {
            rental_id: r.id,
            start_date: r.start_date,
            end_date: r.end_date,
            status: r.status,
            car: c.map(|c| RentalCar {
                id: c.id,
                brand: c.brand,
                model: c.model,
                price_per_day: c.price_per_day,
                image_url: c.image_url,
                description: c.description,
                owner_name: c.owner_name,
                contact: c.owner_phone,
            }),
            payments: ps
                .into_iter()
                .map(|p| PaymentLine {
                    payment_id: p.id,
                    amount: p.amount,
                    method: p.method,
                    status: p.status,
                    payment_date: p.payment_date,
                })
                .collect(),
            penalties: pens
                .into_iter()
                .map(|p| PenaltyLine {
                    penalty_id: p.id,
                    penalty_type: p.penalty_type,
                    amount: p.amount,
                    reason: p.reason,
                    created_at: p.created_at,
                })
                .collect(),
        });
    }
    Ok(out)
}
