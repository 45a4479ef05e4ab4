use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, TransactWriteItem};
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};
use std::collections::HashMap;
use tracing::{debug, warn};

#[cfg(test)]
use mockall::automock;

const EMAIL_INDEX: &str = "GSI_UserByEmail";
const EMAIL_CLAIM_PREFIX: &str = "EMAIL#";

/// Persistence boundary for user records.
///
/// Lookups return `Ok(None)` when nothing matches; `NotFound` is reserved
/// for writes that target a record which does not exist.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, UserRepositoryError>;
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn delete(&self, user_id: &str) -> Result<(), UserRepositoryError>;
}

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

fn dynamo_error<E>(err: E) -> UserRepositoryError
where
    E: std::error::Error,
{
    UserRepositoryError::DynamoDb(DisplayErrorContext(err).to_string())
}

/// Key of the item that reserves an email for a single user.
///
/// Claims share the users table but carry no `email` attribute, so they stay
/// out of the email index.
pub fn email_claim_key(email: &str) -> String {
    format!("{}{}", EMAIL_CLAIM_PREFIX, email)
}

fn email_claim_item(user: &User) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "id".to_string(),
            AttributeValue::S(email_claim_key(&user.email)),
        ),
        ("user_id".to_string(), AttributeValue::S(user.id.clone())),
    ])
}

/// Writes the user and its email claim together; either existing aborts both.
pub fn build_create_items(
    table_name: &str,
    user: &User,
) -> Result<Vec<TransactWriteItem>, UserRepositoryError> {
    let user_item =
        to_item(user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;

    [user_item, email_claim_item(user)]
        .into_iter()
        .map(|item| {
            let put = Put::builder()
                .table_name(table_name)
                .set_item(Some(item))
                .condition_expression("attribute_not_exists(id)")
                .build()
                .map_err(dynamo_error)?;
            Ok(TransactWriteItem::builder().put(put).build())
        })
        .collect()
}

/// Removes the user and releases its email claim.
pub fn build_delete_items(
    table_name: &str,
    user: &User,
) -> Result<Vec<TransactWriteItem>, UserRepositoryError> {
    let user_delete = Delete::builder()
        .table_name(table_name)
        .key("id", AttributeValue::S(user.id.clone()))
        .condition_expression("attribute_exists(id)")
        .build()
        .map_err(dynamo_error)?;
    let claim_delete = Delete::builder()
        .table_name(table_name)
        .key("id", AttributeValue::S(email_claim_key(&user.email)))
        .build()
        .map_err(dynamo_error)?;

    Ok(vec![
        TransactWriteItem::builder().delete(user_delete).build(),
        TransactWriteItem::builder().delete(claim_delete).build(),
    ])
}

fn is_conditional_cancellation(error: &TransactWriteItemsError) -> bool {
    match error {
        TransactWriteItemsError::TransactionCanceledException(cancelled) => cancelled
            .cancellation_reasons()
            .iter()
            .any(|reason| reason.code() == Some("ConditionalCheckFailed")),
        _ => false,
    }
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError> {
        let result = self
            .client
            .transact_write_items()
            .set_transact_items(Some(build_create_items(&self.table_name, user)?))
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.as_service_error().is_some_and(is_conditional_cancellation) => {
                warn!(user_id = %user.id, "User id or email already claimed");
                Err(UserRepositoryError::AlreadyExists)
            }
            Err(e) => Err(dynamo_error(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(EMAIL_INDEX)
            .key_condition_expression("email = :email")
            .expression_attribute_values(
                ":email",
                to_attribute_value(email)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .limit(1)
            .send()
            .await;
        match result {
            Ok(output) => match output.items.and_then(|items| items.into_iter().next()) {
                Some(item) => {
                    let user: User = from_item(item)
                        .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
                    Ok(Some(user))
                }
                None => {
                    debug!("No user indexed under the requested email");
                    Ok(None)
                }
            },
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|err| err.is_resource_not_found_exception()) =>
            {
                Err(UserRepositoryError::DynamoDb(format!(
                    "User email index not available. Please ensure the GSI '{}' exists and is active.",
                    EMAIL_INDEX
                )))
            }
            Err(e) => Err(dynamo_error(e)),
        }
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(user_id)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(dynamo_error)?;
        match output.item {
            Some(item) => {
                let user: User =
                    from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let item = to_item(user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|err| err.is_conditional_check_failed_exception()) =>
            {
                Err(UserRepositoryError::NotFound)
            }
            Err(e) => Err(dynamo_error(e)),
        }
    }

    async fn delete(&self, user_id: &str) -> Result<(), UserRepositoryError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or(UserRepositoryError::NotFound)?;
        let result = self
            .client
            .transact_write_items()
            .set_transact_items(Some(build_delete_items(&self.table_name, &user)?))
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.as_service_error().is_some_and(is_conditional_cancellation) => {
                Err(UserRepositoryError::NotFound)
            }
            Err(e) => Err(dynamo_error(e)),
        }
    }
}
