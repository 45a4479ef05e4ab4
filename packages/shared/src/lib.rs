pub mod config;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::user::{User, UserResponse};
