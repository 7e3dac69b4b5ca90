use axum::{extract::{rejection::PathRejection, Extension, Path, State}, Json};
use serde::Serialize;

use service::users::{self, AccountProfile, RentalHistory, UserInfo, UserWithAccount};

use crate::errors::JsonApiError;
use crate::session::SessionUser;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct UsersOutput { pub users: Vec<UserWithAccount> }

#[derive(Serialize)]
pub struct RentalsOutput { pub rentals: Vec<RentalHistory> }

#[utoipa::path(get, path = "/api/user", tag = "users", responses((status = 200, description = "All users with account"), (status = 403, description = "Forbidden")))]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<UsersOutput>, JsonApiError> {
    Ok(Json(UsersOutput { users: users::list_users(&state.db).await? }))
}

#[utoipa::path(get, path = "/api/user/{id}", tag = "users", params(("id" = i32, Path, description = "user id")),
    responses((status = 200, description = "User with account"), (status = 400, description = "Invalid ID format"), (status = 404, description = "User not found")))]
pub async fn get_user(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<UserWithAccount>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(users::get_user(&state.db, id).await?))
}

#[utoipa::path(get, path = "/api/user/info", tag = "users", responses((status = 200, description = "Caller's name, email and account info"), (status = 401, description = "Login required")))]
pub async fn info(
    State(state): State<ServerState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<UserInfo>, JsonApiError> {
    Ok(Json(users::user_info(&state.db, user.id).await?))
}

#[utoipa::path(get, path = "/api/user/rentals", tag = "users", responses((status = 200, description = "Caller's rentals with car, payments and penalties"), (status = 401, description = "Login required")))]
pub async fn rentals(
    State(state): State<ServerState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<RentalsOutput>, JsonApiError> {
    Ok(Json(RentalsOutput { rentals: users::user_rentals(&state.db, user.id).await? }))
}

#[utoipa::path(get, path = "/api/account/profile", tag = "users", responses((status = 200, description = "Caller's account with user"), (status = 401, description = "Login required"), (status = 404, description = "Account not found")))]
pub async fn account_profile(
    State(state): State<ServerState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<AccountProfile>, JsonApiError> {
    Ok(Json(users::account_profile(&state.db, user.id).await?))
}
