use axum::{extract::State, Json};
use chrono::Utc;

use service::dashboard::{self, ActiveTransaction, DashboardStats, RecentRental};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/dashboard/stats", tag = "dashboard", responses((status = 200, description = "Fleet and rental counters", body = crate::openapi::DashboardStatsDoc), (status = 403, description = "Forbidden")))]
pub async fn stats(State(state): State<ServerState>) -> Result<Json<DashboardStats>, JsonApiError> {
    Ok(Json(dashboard::stats(&state.db).await?))
}

#[utoipa::path(get, path = "/api/dashboard/recent-rentals", tag = "dashboard", responses((status = 200, description = "Five latest rentals by start date"), (status = 403, description = "Forbidden")))]
pub async fn recent_rentals(State(state): State<ServerState>) -> Result<Json<Vec<RecentRental>>, JsonApiError> {
    Ok(Json(dashboard::recent_rentals(&state.db).await?))
}

#[utoipa::path(get, path = "/api/dashboard/transactions", tag = "dashboard", responses((status = 200, description = "Pending and approved rentals"), (status = 403, description = "Forbidden")))]
pub async fn transactions(State(state): State<ServerState>) -> Result<Json<Vec<ActiveTransaction>>, JsonApiError> {
    Ok(Json(dashboard::active_transactions(&state.db, Utc::now()).await?))
}
