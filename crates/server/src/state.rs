use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::{repo::seaorm::SeaOrmAuthRepository, service::{AuthConfig, AuthService}};
use service::booking::{repo::seaorm::SeaOrmBookingRepository, BookingService};

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub secure_cookie: bool,
}

impl From<&configs::AuthSettings> for ServerAuthConfig {
    fn from(s: &configs::AuthSettings) -> Self {
        Self { jwt_secret: s.jwt_secret.clone(), token_ttl_minutes: s.token_ttl_minutes, secure_cookie: s.secure_cookie }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth: ServerAuthConfig) -> Self { Self { db, auth } }

    pub fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        AuthService::new(
            Arc::new(SeaOrmAuthRepository::new(self.db.clone())),
            AuthConfig { jwt_secret: self.auth.jwt_secret.clone(), token_ttl_minutes: self.auth.token_ttl_minutes },
        )
    }

    pub fn booking_service(&self) -> BookingService<SeaOrmBookingRepository> {
        BookingService::new(Arc::new(SeaOrmBookingRepository::new(self.db.clone())))
    }
}
