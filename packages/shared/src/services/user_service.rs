use std::sync::Arc;

use tracing::{debug, info};

use crate::models::auth::requests::{
    AuthenticationRequest, ProfileUpdateRequest, RegistrationRequest,
};
use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;
use crate::services::validation::{is_valid_email, is_valid_password, MIN_PASSWORD_LENGTH};

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        UserService { repository }
    }

    pub async fn register(&self, request: &RegistrationRequest) -> Result<User, UserServiceError> {
        if request.first_name.is_empty() || request.last_name.is_empty() {
            return Err(UserServiceError::InvalidInput(
                "First name and last name cannot be empty".to_string(),
            ));
        }
        if !is_valid_password(&request.password) {
            return Err(UserServiceError::InvalidInput(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        if !is_valid_email(&request.email) {
            return Err(UserServiceError::InvalidInput(
                "Email address is malformed".to_string(),
            ));
        }
        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(UserServiceError::UserAlreadyExists);
        }

        let user = User::new(
            request.email.clone(),
            request.password.clone(),
            request.first_name.clone(),
            request.last_name.clone(),
        );
        self.repository.create(&user).await.map_err(|e| match e {
            UserRepositoryError::AlreadyExists => UserServiceError::UserAlreadyExists,
            other => UserServiceError::RepositoryError(other),
        })?;
        info!(user_id = %user.id, "Registered new user");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<User, UserServiceError> {
        if email.is_empty() {
            return Err(UserServiceError::UserNotFound);
        }
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserServiceError::UserNotFound)
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<User, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::UserNotFound);
        }
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserServiceError::UserNotFound)
    }

    pub async fn authenticate(
        &self,
        request: &AuthenticationRequest,
    ) -> Result<User, UserServiceError> {
        let user = self.find_by_email(&request.email).await?;
        if user.password != request.password {
            debug!(user_id = %user.id, "Authentication failed: wrong password");
            return Err(UserServiceError::WrongPassword);
        }
        debug!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdateRequest,
    ) -> Result<User, UserServiceError> {
        let names = [update.first_name.as_deref(), update.last_name.as_deref()];
        if names.iter().flatten().any(|name| name.is_empty()) {
            return Err(UserServiceError::InvalidInput(
                "First name and last name cannot be empty".to_string(),
            ));
        }

        let mut user = self.find_by_id(user_id).await?;
        if let Some(first_name) = &update.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &update.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(photo) = &update.photo {
            user.photo = Some(photo.clone());
        }
        if let Some(favorite_movie) = &update.favorite_movie {
            user.favorite_movie = Some(favorite_movie.clone());
        }
        if let Some(favorite_book) = &update.favorite_book {
            user.favorite_book = Some(favorite_book.clone());
        }

        self.repository.update(&user).await.map_err(|e| match e {
            UserRepositoryError::NotFound => UserServiceError::UserNotFound,
            other => UserServiceError::RepositoryError(other),
        })?;
        debug!(user_id = %user.id, "Updated user profile");
        Ok(user)
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::UserNotFound);
        }
        self.repository.delete(user_id).await.map_err(|e| match e {
            UserRepositoryError::NotFound => UserServiceError::UserNotFound,
            other => UserServiceError::RepositoryError(other),
        })?;
        info!(user_id = %user_id, "Deleted user");
        Ok(())
    }
}
