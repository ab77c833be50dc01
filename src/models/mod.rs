// src/models/mod.rs
pub mod project;
pub mod user;
