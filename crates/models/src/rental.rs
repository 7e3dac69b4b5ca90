use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{car, errors, payment, penalty, user};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rental")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub car_id: i32,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub status: RentalStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Car,
    Payment,
    Penalty,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Car => Entity::belongs_to(car::Entity)
                .from(Column::CarId)
                .to(car::Column::Id)
                .into(),
            Relation::Payment => Entity::has_many(payment::Entity).into(),
            Relation::Penalty => Entity::has_many(penalty::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<car::Entity> for Entity {
    fn to() -> RelationDef { Relation::Car.def() }
}

impl Related<payment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Payment.def() }
}

impl Related<penalty::Entity> for Entity {
    fn to() -> RelationDef { Relation::Penalty.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_range(start: &DateTimeWithTimeZone, end: &DateTimeWithTimeZone) -> Result<(), errors::ModelError> {
    if start >= end {
        return Err(errors::ModelError::Validation("start date must be before end date".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    car_id: i32,
    start_date: DateTimeWithTimeZone,
    end_date: DateTimeWithTimeZone,
    status: RentalStatus,
) -> Result<Model, errors::ModelError> {
    validate_range(&start_date, &end_date)?;
    let am = ActiveModel {
        user_id: Set(user_id),
        car_id: Set(car_id),
        start_date: Set(start_date),
        end_date: Set(end_date),
        status: Set(status),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::Db)
}
