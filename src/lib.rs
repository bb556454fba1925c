//! BiblioStaff - Library Staff Management Server
//!
//! A Rust REST backend for managing library staff accounts (admins and
//! librarians): registration, login, profiles and supervisor assignment.

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
