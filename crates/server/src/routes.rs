use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::session::{require_admin, require_session};
use crate::state::ServerState;

pub mod auth;
pub mod booking;
pub mod cars;
pub mod dashboard;
pub mod payments;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router, including public, session and admin routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/cars", get(cars::list_cars))
        .route("/api/cars/:id", get(cars::get_car));

    // Logged-in users
    let session = Router::new()
        .route("/api/auth/session", get(auth::session))
        .route("/api/booking", post(booking::create_booking))
        .route("/api/account/profile", get(users::account_profile))
        .route("/api/user/info", get(users::info))
        .route("/api/user/rentals", get(users::rentals))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    // Admin routes; require_session is the outer layer
    let admin = Router::new()
        .route("/api/cars/bulk", post(cars::bulk_import))
        .route("/api/cars/owners", get(cars::owners))
        .route("/api/user", get(users::list_users))
        .route("/api/user/:id", get(users::get_user))
        .route("/api/dashboard/stats", get(dashboard::stats))
        .route("/api/dashboard/recent-rentals", get(dashboard::recent_rentals))
        .route("/api/dashboard/transactions", get(dashboard::transactions))
        .route("/api/payment/info", get(payments::payment_info))
        .route("/api/transaction/info", get(payments::payment_info))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    // Compose
    public
        .merge(session)
        .merge(admin)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
