use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, rental};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "penalty")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rental_id: i32,
    /// e.g. `LATE_RETURN`, `DAMAGE`
    #[serde(rename = "type")]
    pub penalty_type: String,
    pub amount: f64,
    pub reason: String,
    pub created_at: DateTimeWithTimeZone,
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
    penalty_type: &str,
    amount: f64,
    reason: &str,
) -> Result<Model, errors::ModelError> {
    if penalty_type.trim().is_empty() {
        return Err(errors::ModelError::Validation("penalty type required".into()));
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(errors::ModelError::Validation("amount must not be negative".into()));
    }
    let am = ActiveModel {
        rental_id: Set(rental_id),
        penalty_type: Set(penalty_type.trim().to_ascii_uppercase()),
        amount: Set(amount),
        reason: Set(reason.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::Db)
}
