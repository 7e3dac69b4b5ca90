pub mod errors;
pub mod db;
pub mod user;
pub mod account;
pub mod car;
pub mod rental;
pub mod payment;
pub mod penalty;

#[cfg(test)]
mod tests;
