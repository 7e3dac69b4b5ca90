use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(Serialize, ToSchema)]
pub struct PaymentRequestDoc {
    pub amount: f64,
    /// `BANK` or `EWALLET`, any case
    pub method: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestDoc {
    pub car_id: i32,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub start_date: String,
    pub end_date: String,
    pub payment: PaymentRequestDoc,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCarDoc {
    pub brand: String,
    pub model: String,
    pub price_per_day: f64,
    pub availability: Option<bool>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Serialize, ToSchema)]
pub struct BulkCarsDoc { pub cars: Vec<NewCarDoc> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarCardDoc {
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

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarPageDoc {
    pub cars: Vec<CarCardDoc>,
    pub total_pages: u64,
    pub min_price: f64,
    pub max_price: f64,
    pub brands: Vec<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDoc {
    pub total_cars: u64,
    pub active_rentals: u64,
    pub pending_payments: u64,
    pub penalties: u64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::session,
        crate::routes::cars::list_cars,
        crate::routes::cars::get_car,
        crate::routes::cars::bulk_import,
        crate::routes::cars::owners,
        crate::routes::booking::create_booking,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::info,
        crate::routes::users::rentals,
        crate::routes::users::account_profile,
        crate::routes::dashboard::stats,
        crate::routes::dashboard::recent_rentals,
        crate::routes::dashboard::transactions,
        crate::routes::payments::payment_info,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            PaymentRequestDoc,
            BookingRequestDoc,
            NewCarDoc,
            BulkCarsDoc,
            CarCardDoc,
            CarPageDoc,
            DashboardStatsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "cars"),
        (name = "booking"),
        (name = "users"),
        (name = "dashboard"),
        (name = "payments")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_booking_and_catalog_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/booking"));
        assert!(paths.contains_key("/api/cars"));
        assert!(paths.contains_key("/api/cars/{id}"));
        assert!(paths.contains_key("/api/dashboard/transactions"));
    }
}
