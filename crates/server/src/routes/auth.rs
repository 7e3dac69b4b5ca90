use axum::{extract::{rejection::JsonRejection, Extension, State}, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use service::auth::domain::{AuthUser, LoginInput, RegisterInput};

use crate::errors::JsonApiError;
use crate::session::{SessionUser, AUTH_COOKIE};
use crate::state::ServerState;

#[derive(Serialize)]
pub struct PublicUser { pub id: i32, pub name: String, pub email: String }

impl From<AuthUser> for PublicUser {
    fn from(u: AuthUser) -> Self { Self { id: u.id, name: u.name, email: u.email } }
}

#[derive(Serialize)]
pub struct RegisterOutput { pub message: String, pub user: PublicUser }

#[derive(Serialize)]
pub struct LoginOutput { pub message: String, pub user: AuthUser, pub token: String }

#[derive(Serialize)]
pub struct SessionOutput { pub user: AuthUser }

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered"), (status = 400, description = "Invalid input or email already registered")))]
pub async fn register(
    State(state): State<ServerState>,
    body: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterOutput>), JsonApiError> {
    let Json(input) = body?;
    let user = state.auth_service().register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterOutput { message: "User registered successfully".into(), user: user.into() })))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in; sets auth_token cookie"), (status = 400, description = "Invalid input"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let Json(input) = body?;
    let session = state.auth_service().login(input).await?;

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(state.auth.secure_cookie);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    Ok((jar, Json(LoginOutput { message: "Login successful".into(), user: session.user, token: session.token })))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", responses((status = 200, description = "Session cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<common::types::Message>) {
    // 显式下发过期 Cookie，请求未携带 Cookie 时同样生效
    let mut cookie = Cookie::new(AUTH_COOKIE, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.make_removal();
    (jar.add(cookie), Json(common::types::Message::new("Logged out")))
}

#[utoipa::path(get, path = "/api/auth/session", tag = "auth", responses((status = 200, description = "Current user"), (status = 401, description = "No valid session")))]
pub async fn session(
    State(state): State<ServerState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<SessionOutput>, JsonApiError> {
    let user = state.auth_service().user_by_id(user.id).await?;
    Ok(Json(SessionOutput { user }))
}
