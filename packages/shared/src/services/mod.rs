pub mod auth_service;
pub mod errors;
pub mod user_service;
pub mod validation;
