//! # Plando API Server Library
//!
//! HTTP surface of the Plando todo service: signup and signin with bearer
//! tokens, todos stamped with the day's weather, managers, comments and a
//! small set of admin endpoints whose execution time is logged.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Admin execution tracking
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
