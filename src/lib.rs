// src/lib.rs

pub mod config;
pub mod error;
pub mod evaluation;
pub mod handlers;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod store;
pub mod validation;

pub use routes::create_router;
