pub mod auth_service_errors;
pub mod user_service_errors;
