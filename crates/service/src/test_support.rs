#![cfg(test)]
use sea_orm::DatabaseConnection;

use models::{car, user};

/// Fresh migrated in-memory database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub async fn seed_user(db: &DatabaseConnection, name: &str, email: &str, role: user::Role) -> Result<user::Model, anyhow::Error> {
    Ok(user::create(db, name, email, "$argon2id$v=19$m=19456,t=2,p=1$c2VlZA$seed".into(), role).await?)
}

pub async fn seed_car(db: &DatabaseConnection, brand: &str, model: &str, price: f64, rating: Option<f64>) -> Result<car::Model, anyhow::Error> {
    Ok(car::create(
        db,
        car::NewCar {
            brand: brand.into(),
            model: model.into(),
            price_per_day: price,
            availability: true,
            image_url: None,
            description: Some(format!("{brand} {model}")),
            owner_name: "Rudi".into(),
            owner_phone: Some("081234567890".into()),
            rating,
        },
    )
    .await?)
}
