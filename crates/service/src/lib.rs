//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod users;
pub mod dashboard;
pub mod payments;
#[cfg(test)]
pub mod test_support;
