use axum::{extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use models::car;
use service::catalog::{self, CarFilter, CarPage, OwnerCar};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Deserialize)]
pub struct BulkCarsInput {
    #[serde(default)]
    pub cars: Vec<car::NewCar>,
}

#[derive(Serialize)]
pub struct BulkCarsOutput { pub message: String, pub count: u64 }

/// 分页、筛选后的车辆列表
#[utoipa::path(get, path = "/api/cars", tag = "cars",
    params(
        ("page" = Option<u32>, Query, description = "1-based page, 9 cars per page"),
        ("brand" = Option<String>, Query, description = "exact brand, case-insensitive"),
        ("minPrice" = Option<f64>, Query, description = "minimum price per day"),
        ("maxPrice" = Option<f64>, Query, description = "maximum price per day"),
        ("rating" = Option<f64>, Query, description = "minimum rating"),
    ),
    responses((status = 200, description = "Car page", body = crate::openapi::CarPageDoc), (status = 400, description = "Invalid query")))]
pub async fn list_cars(
    State(state): State<ServerState>,
    query: Result<Query<CarFilter>, QueryRejection>,
) -> Result<Json<CarPage>, JsonApiError> {
    let Query(filter) = query?;
    Ok(Json(catalog::list_cars(&state.db, filter).await?))
}

#[utoipa::path(get, path = "/api/cars/{id}", tag = "cars", params(("id" = i32, Path, description = "car id")),
    responses((status = 200, description = "Car"), (status = 400, description = "Invalid ID format"), (status = 404, description = "Car not found")))]
pub async fn get_car(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<car::Model>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(catalog::get_car(&state.db, id).await?))
}

/// 批量导入车辆（管理员）
#[utoipa::path(post, path = "/api/cars/bulk", tag = "cars", request_body = crate::openapi::BulkCarsDoc,
    responses((status = 201, description = "Cars imported"), (status = 400, description = "Empty or invalid car list"), (status = 403, description = "Forbidden")))]
pub async fn bulk_import(
    State(state): State<ServerState>,
    body: Result<Json<BulkCarsInput>, JsonRejection>,
) -> Result<(StatusCode, Json<BulkCarsOutput>), JsonApiError> {
    let Json(input) = body?;
    let count = catalog::import_cars(&state.db, input.cars).await?;
    Ok((StatusCode::CREATED, Json(BulkCarsOutput { message: format!("{count} cars imported"), count })))
}

#[utoipa::path(get, path = "/api/cars/owners", tag = "cars", responses((status = 200, description = "Fleet with owner details"), (status = 403, description = "Forbidden")))]
pub async fn owners(State(state): State<ServerState>) -> Result<Json<Vec<OwnerCar>>, JsonApiError> {
    Ok(Json(catalog::list_owners(&state.db).await?))
}
