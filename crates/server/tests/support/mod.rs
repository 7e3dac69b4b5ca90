#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{json, Value};
use tower::Service;

use models::{car, user};
use server::routes;
use server::state::{ServerAuthConfig, ServerState};

pub const JWT_SECRET: &str = "test-secret";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

pub fn test_state(db: DatabaseConnection) -> ServerState {
    ServerState::new(
        db,
        ServerAuthConfig { jwt_secret: JWT_SECRET.into(), token_ttl_minutes: 60, secure_cookie: false },
    )
}

/// Router over a fresh in-memory database
pub async fn build_app() -> anyhow::Result<(Router, DatabaseConnection)> {
    let db = models::db::connect_in_memory().await?;
    let app = routes::build_router(test_state(db.clone()), cors());
    Ok((app, db))
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> anyhow::Result<Request<Body>> {
    let mut b = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {t}"));
    }
    Ok(b.body(Body::from(serde_json::to_vec(&body)?))?)
}

pub fn get_request(uri: &str, token: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut b = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {t}"));
    }
    Ok(b.body(Body::empty())?)
}

/// Send a request and decode the JSON body (`Null` when empty)
pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> anyhow::Result<(StatusCode, Value)> {
    send(app, json_request("POST", "/api/auth/register", None, json!({"name": name, "email": email, "password": password}))?).await
}

/// Register then log in; returns the session token
pub async fn register_and_login(app: &Router, name: &str, email: &str) -> anyhow::Result<String> {
    let (status, _) = register(app, name, email, "rahasia123").await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(app, json_request("POST", "/api/auth/login", None, json!({"email": email, "password": "rahasia123"}))?).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

/// Register a user, flip its role to ADMIN, then log in so the token carries the role
pub async fn admin_token(app: &Router, db: &DatabaseConnection) -> anyhow::Result<String> {
    let (status, body) = register(app, "Admin", "admin@example.com", "rahasia123").await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["user"]["id"].as_i64().unwrap_or_default() as i32;
    let am = user::ActiveModel { id: Set(id), role: Set(user::Role::Admin), ..Default::default() };
    am.update(db).await?;
    let (status, body) = send(app, json_request("POST", "/api/auth/login", None, json!({"email": "admin@example.com", "password": "rahasia123"}))?).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

pub async fn seed_car(db: &DatabaseConnection, brand: &str, price: f64, available: bool) -> anyhow::Result<car::Model> {
    Ok(car::create(
        db,
        car::NewCar {
            brand: brand.into(),
            model: "Test".into(),
            price_per_day: price,
            availability: available,
            image_url: None,
            description: None,
            owner_name: "Owner".into(),
            owner_phone: Some("0812".into()),
            rating: Some(4.0),
        },
    )
    .await?)
}

pub fn booking_body(car_id: i32, start: &str, end: &str) -> Value {
    json!({
        "carId": car_id,
        "startDate": start,
        "endDate": end,
        "payment": {"amount": 700000, "method": "bank"}
    })
}
