//! Cross-crate helpers: wire-level response types and tracing setup.

pub mod types;
pub mod utils;
