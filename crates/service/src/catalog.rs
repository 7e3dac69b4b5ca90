//! Car catalog: filtered listing, lookup, fleet import and owner listing.

use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::car;
use crate::{errors::ServiceError, pagination::{self, Pagination}};

/// Price bounds reported when the fleet is empty.
pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 1_000_000.0;

/// Listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarFilter {
    pub page: Option<u32>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// minimum rating
    pub rating: Option<f64>,
}

/// Car as shown on listing cards
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarCard {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub price_per_day: f64,
    pub image_url: String,
    pub description: Option<String>,
    pub availability: bool,
    pub owner_name: String,
    pub car_rating: Option<f64>,
}

impl From<car::Model> for CarCard {
    fn from(c: car::Model) -> Self {
        Self {
            id: c.id,
            brand: c.brand,
            model: c.model,
            price_per_day: c.price_per_day,
            image_url: c.image_url.unwrap_or_else(|| car::PLACEHOLDER_IMAGE.to_string()),
            description: c.description,
            availability: c.availability,
            owner_name: c.owner_name,
            car_rating: c.rating,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPage {
    pub cars: Vec<CarCard>,
    pub total_pages: u64,
    pub min_price: f64,
    pub max_price: f64,
    pub brands: Vec<String>,
}

/// Fleet row for the owners view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCar {
    pub id: i32,
    pub car_brand: String,
    pub car_model: String,
    pub price_per_day: f64,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub availability: bool,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub car_rating: Option<f64>,
}

fn apply_filter(mut q: Select<car::Entity>, f: &CarFilter) -> Select<car::Entity> {
    if let Some(brand) = f.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        q = q.filter(Expr::expr(Func::lower(Expr::col(car::Column::Brand))).eq(brand.to_lowercase()));
    }
    if let Some(min) = f.min_price {
        q = q.filter(car::Column::PricePerDay.gte(min));
    }
    if let Some(max) = f.max_price {
        q = q.filter(car::Column::PricePerDay.lte(max));
    }
    if let Some(rating) = f.rating {
        q = q.filter(car::Column::Rating.gte(rating));
    }
    q
}

/// Paginated, filtered listing plus the price bounds and brand list of the whole fleet.
#[instrument(skip(db))]
pub async fn list_cars(db: &DatabaseConnection, filter: CarFilter) -> Result<CarPage, ServiceError> {
    if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
        if min > max {
            return Err(ServiceError::Validation("minPrice must not exceed maxPrice".into()));
        }
    }
    let (page_idx, per_page) = Pagination::catalog(filter.page).normalize();

    let paginator = apply_filter(car::Entity::find(), &filter)
        .order_by_asc(car::Column::Id)
        .paginate(db, per_page);
    let total = paginator.num_items().await?;
    let cars = paginator.fetch_page(page_idx).await?;

    let bounds: Option<(Option<f64>, Option<f64>)> = car::Entity::find()
        .select_only()
        .column_as(car::Column::PricePerDay.min(), "min_price")
        .column_as(car::Column::PricePerDay.max(), "max_price")
        .into_tuple()
        .one(db)
        .await?;
    let (min_price, max_price) = bounds.unwrap_or((None, None));

    let brands: Vec<String> = car::Entity::find()
        .select_only()
        .column(car::Column::Brand)
        .distinct()
        .order_by_asc(car::Column::Brand)
        .into_tuple()
        .all(db)
        .await?;

    Ok(CarPage {
        cars: cars.into_iter().map(CarCard::from).collect(),
        total_pages: pagination::total_pages(total, per_page),
        min_price: min_price.unwrap_or(DEFAULT_MIN_PRICE),
        max_price: max_price.unwrap_or(DEFAULT_MAX_PRICE),
        brands,
    })
}

/// Get car by id.
pub async fn get_car(db: &DatabaseConnection, id: i32) -> Result<car::Model, ServiceError> {
    car::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("car"))
}

/// Insert a batch of cars; all rows are validated before any is written.
#[instrument(skip(db, cars), fields(count = cars.len()))]
pub async fn import_cars(db: &DatabaseConnection, cars: Vec<car::NewCar>) -> Result<u64, ServiceError> {
    if cars.is_empty() {
        return Err(ServiceError::Validation("cars must be a non-empty array".into()));
    }
    let inserted = car::create_many(db, cars).await?;
    info!(inserted, "cars_imported");
    Ok(inserted)
}

pub async fn list_owners(db: &DatabaseConnection) -> Result<Vec<OwnerCar>, ServiceError> {
    let cars = car::Entity::find().order_by_asc(car::Column::Id).all(db).await?;
    Ok(cars
        .into_iter()
        .map(|c| OwnerCar {
            id: c.id,
            car_brand: c.brand,
            car_model: c.model,
            price_per_day: c.price_per_day,
            image_url: c.image_url,
            description: c.description,
            availability: c.availability,
            owner_name: c.owner_name,
            owner_phone: c.owner_phone,
            car_rating: c.rating,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_car};

    #[tokio::test]
    async fn empty_fleet_uses_default_bounds() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let page = list_cars(&db, CarFilter::default()).await?;
        assert!(page.cars.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.min_price, DEFAULT_MIN_PRICE);
        assert_eq!(page.max_price, DEFAULT_MAX_PRICE);
        assert!(page.brands.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn pages_hold_nine_cars() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for i in 0..11 {
            seed_car(&db, if i % 2 == 0 { "Toyota" } else { "Honda" }, &format!("M{i}"), 100_000.0 + i as f64 * 10_000.0, Some(3.0 + (i % 3) as f64)).await?;
        }
        let first = list_cars(&db, CarFilter::default()).await?;
        assert_eq!(first.cars.len(), 9);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.min_price, 100_000.0);
        assert_eq!(first.max_price, 200_000.0);
        assert_eq!(first.brands, vec!["Honda".to_string(), "Toyota".to_string()]);
        assert_eq!(first.cars[0].image_url, car::PLACEHOLDER_IMAGE);

        let second = list_cars(&db, CarFilter { page: Some(2), ..Default::default() }).await?;
        assert_eq!(second.cars.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn filters_narrow_the_listing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed_car(&db, "Toyota", "Avanza", 300_000.0, Some(4.5)).await?;
        seed_car(&db, "Toyota", "Innova", 600_000.0, Some(3.5)).await?;
        seed_car(&db, "Honda", "Brio", 250_000.0, None).await?;

        let toyota = list_cars(&db, CarFilter { brand: Some("toyota".into()), ..Default::default() }).await?;
        assert_eq!(toyota.cars.len(), 2);
        // bounds and brands describe the whole fleet
        assert_eq!(toyota.min_price, 250_000.0);
        assert_eq!(toyota.brands.len(), 2);

        let cheap = list_cars(&db, CarFilter { max_price: Some(300_000.0), ..Default::default() }).await?;
        assert_eq!(cheap.cars.len(), 2);

        let rated = list_cars(&db, CarFilter { rating: Some(4.0), ..Default::default() }).await?;
        assert_eq!(rated.cars.len(), 1);
        assert_eq!(rated.cars[0].model, "Avanza");

        let inverted = list_cars(&db, CarFilter { min_price: Some(5.0), max_price: Some(1.0), ..Default::default() }).await;
        assert!(matches!(inverted, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn get_import_and_owners() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(matches!(get_car(&db, 1).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(import_cars(&db, vec![]).await, Err(ServiceError::Validation(_))));

        let rows: Vec<car::NewCar> = serde_json::from_value(serde_json::json!([
            { "brand": "Daihatsu", "model": "Xenia", "pricePerDay": 320000.0, "ownerName": "Joko" },
            { "brand": "Mitsubishi", "model": "Xpander", "pricePerDay": 450000.0, "ownerName": "Wati", "ownerPhone": "0813" }
        ]))?;
        assert_eq!(import_cars(&db, rows).await?, 2);

        let owners = list_owners(&db).await?;
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[1].owner_phone.as_deref(), Some("0813"));
        let car = get_car(&db, owners[0].id).await?;
        assert_eq!(car.display_name(), "Daihatsu Xenia");
        Ok(())
    }
}
