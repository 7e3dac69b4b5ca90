use axum::{extract::{Request, State}, middleware::Next, response::Response};
use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use models::user::Role;
use serde::Serialize;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Authenticated caller, inserted into request extensions by [`require_session`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}

/// Authorization: Bearer 优先，其次 auth_token Cookie
fn extract_token(headers: &HeaderMap) -> Result<Option<String>, JsonApiError> {
    if let Some(h) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Ok(Some(t.trim().to_string())),
            _ => Err(JsonApiError::unauthorized("invalid Authorization format (expect Bearer)")),
        };
    }
    let jar = CookieJar::from_headers(headers);
    Ok(jar
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty()))
}

/// 校验会话令牌，并把 SessionUser 注入请求扩展
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let token = match extract_token(req.headers())? {
        Some(t) => t,
        None => {
            tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
            return Err(JsonApiError::unauthorized("login required"));
        }
    };

    let claims = state.auth_service().verify(&token).map_err(|e| {
        tracing::warn!(path = %path, err = %e, "token validation failed");
        JsonApiError::unauthorized("invalid or expired session")
    })?;
    let id = claims.user_id().map_err(|_| JsonApiError::unauthorized("invalid session subject"))?;

    req.extensions_mut().insert(SessionUser { id, name: claims.name, email: claims.email, role: claims.role });
    Ok(next.run(req).await)
}

/// 仅管理员可访问；需叠加在 require_session 之内
pub async fn require_admin(req: Request, next: Next) -> Result<Response, JsonApiError> {
    let user = req
        .extensions()
        .get::<SessionUser>()
        .cloned()
        .ok_or_else(|| JsonApiError::unauthorized("login required"))?;
    if !user.is_admin() {
        tracing::warn!(user_id = user.id, path = %req.uri().path(), "admin route denied");
        return Err(JsonApiError::forbidden("admin role required"));
    }
    Ok(next.run(req).await)
}
