use std::{fmt, str::FromStr};

use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, rental};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "PAID")]
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "BANK")]
    Bank,
    #[sea_orm(string_value = "EWALLET")]
    Ewallet,
}

impl FromStr for PaymentMethod {
    type Err = errors::ModelError;

    /// Case-insensitive: clients send `bank`, `Bank` or `BANK`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BANK" => Ok(PaymentMethod::Bank),
            "EWALLET" => Ok(PaymentMethod::Ewallet),
            other => Err(errors::ModelError::Validation(format!("unsupported payment method: {other}"))),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rental_id: i32,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub payment_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Rental }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Rental => Entity::belongs_to(rental::Entity)
                .from(Column::RentalId)
                .to(rental::Column::Id)
                .into(),
        }
    }
}

impl Related<rental::Entity> for Entity {
    fn to() -> RelationDef { Relation::Rental.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    rental_id: i32,
    amount: f64,
    method: PaymentMethod,
    status: PaymentStatus,
) -> Result<Model, errors::ModelError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(errors::ModelError::Validation("amount must be positive".into()));
    }
    let am = ActiveModel {
        rental_id: Set(rental_id),
        amount: Set(amount),
        method: Set(method),
        status: Set(status),
        payment_date: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::Db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parsing_ignores_case() {
        assert_eq!("bank".parse::<PaymentMethod>().unwrap(), PaymentMethod::Bank);
        assert_eq!(" EWallet ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Ewallet);
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn status_display_matches_column_value() {
        assert_eq!(PaymentStatus::Paid.to_string(), "PAID");
        assert_eq!(PaymentStatus::Pending.to_string(), "PENDING");
    }
}
