/// CRUD operations tests for all models
pub mod crud_tests;


use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::{car, db, user};

/// Setup test database (in-memory SQLite, migrated)
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    db::connect_in_memory().await
}

pub async fn seed_user(db: &DatabaseConnection, email: &str) -> Result<user::Model> {
    Ok(user::create(db, "Seed User", email, "$argon2id$v=19$seed".into(), user::Role::User).await?)
}

pub async fn seed_car(db: &DatabaseConnection, brand: &str, price: f64) -> Result<car::Model> {
    Ok(car::create(
        db,
        car::NewCar {
            brand: brand.into(),
            model: "Model X".into(),
            price_per_day: price,
            availability: true,
            image_url: None,
            description: Some("seeded".into()),
            owner_name: "Owner".into(),
            owner_phone: Some("0812000000".into()),
            rating: Some(4.0),
        },
    )
    .await?)
}
