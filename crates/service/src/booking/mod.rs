//! Booking module: validates a rental request, then commits rental, payment and
//! car-availability flip in one transaction.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::BookingService;
