//! # Plando Shared Library
//!
//! Domain types, persistence and business rules for the Plando todo
//! service. The HTTP server in `plando-api` is a thin layer over this crate.
//!
//! ## Module Organization
//!
//! - `models`: Database rows and joined views
//! - `repository`: Repository traits with PostgreSQL and in-memory stores
//! - `db`: Connection pool and migrations
//! - `auth`: Password hashing, JWT and authentication middleware
//! - `weather`: Weather feed client used when creating todos
//! - `services`: Business services

pub mod auth;
pub mod db;
pub mod models;
pub mod repository;
pub mod services;
pub mod weather;

/// Current version of the Plando shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
