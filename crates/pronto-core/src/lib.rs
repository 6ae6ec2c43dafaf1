//! PRONTO Core — domain models, error taxonomy, and repository trait
//! definitions shared across all crates.
//!
//! This crate holds no I/O. Storage backends implement the traits in
//! [`repository`]; business services in `pronto-shop` and the auth
//! layer in `pronto-auth` are generic over them.

pub mod error;
pub mod models;
pub mod repository;
