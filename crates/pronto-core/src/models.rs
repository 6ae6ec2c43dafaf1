//! Domain models for PRONTO.
//!
//! These are the core types shared across all crates.

pub mod cart;
pub mod order;
pub mod pizza;
pub mod user;
