use std::str::FromStr;

use chrono::{Duration, Utc};
use thiserror::Error;

use crate::services::auth_service::DEFAULT_TOKEN_TTL_HOURS;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Which [`UserRepository`](crate::repositories::user_repository::UserRepository) backs the service.
#[derive(Debug, Clone, PartialEq)]
pub enum UserStore {
    DynamoDb { table_name: String },
    InMemory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub user_store: UserStore,
    pub token_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let user_store = match lookup("USER_STORE").as_deref() {
            None | Some("dynamodb") => UserStore::DynamoDb {
                table_name: lookup("USERS_TABLE").ok_or(ConfigError::Missing("USERS_TABLE"))?,
            },
            Some("memory") => UserStore::InMemory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "USER_STORE",
                    value: other.to_string(),
                })
            }
        };

        let token_ttl = match lookup("TOKEN_TTL_HOURS") {
            Some(value) => parse_token_ttl(&value).ok_or(ConfigError::Invalid {
                name: "TOKEN_TTL_HOURS",
                value,
            })?,
            None => Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        };

        Ok(AppConfig {
            jwt_secret,
            user_store,
            token_ttl,
        })
    }
}

/// Positive hour count whose expiry is still representable from now.
fn parse_token_ttl(value: &str) -> Option<Duration> {
    let hours = i64::from_str(value).ok().filter(|hours| *hours > 0)?;
    let ttl = Duration::try_hours(hours)?;
    Utc::now().checked_add_signed(ttl).map(|_| ttl)
}
