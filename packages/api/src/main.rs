use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;

use api::{create_app, state::AppState};
use shared::config::{AppConfig, UserStore};
use shared::repositories::in_memory_user_repository::InMemoryUserRepository;
use shared::repositories::user_repository::{DynamoDbUserRepository, UserRepository};
use shared::services::auth_service::AuthService;
use shared::services::user_service::UserService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    let config = AppConfig::from_env()?;

    let user_repository: Arc<dyn UserRepository + Send + Sync> = match &config.user_store {
        UserStore::DynamoDb { table_name } => {
            let aws_config = aws_config::load_from_env().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);
            Arc::new(DynamoDbUserRepository::new(client, table_name.clone()))
        }
        UserStore::InMemory => {
            tracing::warn!("Using in-memory user store; data is lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let user_service = Arc::new(UserService::new(user_repository));
    let auth_service = Arc::new(AuthService::new(
        user_service.clone(),
        config.jwt_secret.clone(),
        config.token_ttl,
    ));

    let app = create_app(AppState {
        auth_service,
        user_service,
    });

    run(app).await
}
