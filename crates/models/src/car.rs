use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, rental, user};

/// Shown by listings when a car has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150x250";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub price_per_day: f64,
    pub availability: bool,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub rating: Option<f64>,
    /// Current renter, set when the car is booked
    pub user_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Renter,
    Rental,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Renter => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Rental => Entity::has_many(rental::Entity).into(),
        }
    }
}

impl Related<rental::Entity> for Entity {
    fn to() -> RelationDef { Relation::Rental.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Input row for fleet imports.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub price_per_day: f64,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_name: String,
    #[serde(default)]
    pub owner_phone: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

fn default_availability() -> bool { true }

impl NewCar {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if self.brand.trim().is_empty() || self.model.trim().is_empty() {
            return Err(errors::ModelError::Validation("brand and model are required".into()));
        }
        if self.owner_name.trim().is_empty() {
            return Err(errors::ModelError::Validation("ownerName is required".into()));
        }
        if !self.price_per_day.is_finite() || self.price_per_day <= 0.0 {
            return Err(errors::ModelError::Validation("pricePerDay must be positive".into()));
        }
        if let Some(r) = self.rating {
            if !(0.0..=5.0).contains(&r) {
                return Err(errors::ModelError::Validation("rating must be within 0..=5".into()));
            }
        }
        Ok(())
    }

    fn into_active_model(self) -> ActiveModel {
        let now = Utc::now().into();
        ActiveModel {
            brand: Set(self.brand.trim().to_string()),
            model: Set(self.model.trim().to_string()),
            price_per_day: Set(self.price_per_day),
            availability: Set(self.availability),
            image_url: Set(self.image_url),
            description: Set(self.description),
            owner_name: Set(self.owner_name),
            owner_phone: Set(self.owner_phone),
            rating: Set(self.rating),
            user_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewCar) -> Result<Model, errors::ModelError> {
    input.validate()?;
    input
        .into_active_model()
        .insert(db)
        .await
        .map_err(errors::ModelError::Db)
}

/// Validate every row first, then insert all of them; returns the number inserted.
pub async fn create_many<C: ConnectionTrait>(db: &C, inputs: Vec<NewCar>) -> Result<u64, errors::ModelError> {
    if inputs.is_empty() {
        return Ok(0);
    }
    for (idx, c) in inputs.iter().enumerate() {
        c.validate()
            .map_err(|e| errors::ModelError::Validation(format!("cars[{idx}]: {e}")))?;
    }
    let count = inputs.len() as u64;
    Entity::insert_many(inputs.into_iter().map(NewCar::into_active_model))
        .exec(db)
        .await
        .map_err(errors::ModelError::Db)?;
    Ok(count)
}
