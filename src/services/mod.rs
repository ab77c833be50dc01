// src/services/mod.rs
pub mod auth_service;
pub mod date_service;
pub mod project_service;
pub mod user_service;
