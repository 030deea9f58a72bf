//! Common library for the Nyumbani rental marketplace
//!
//! This crate provides shared functionality used across the marketplace
//! services: PostgreSQL connection pooling, idempotent schema bootstrap,
//! and common error types.

pub mod database;
pub mod error;
pub mod schema;
