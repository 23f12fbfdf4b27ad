//! Libris Library Catalog and Ordering System
//!
//! A Rust implementation of the Libris catalog server, providing a public
//! website flow for browsing and ordering books and a REST JSON API for
//! managing authors, books and orders.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
