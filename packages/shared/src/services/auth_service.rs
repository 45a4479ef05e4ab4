use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::debug;

use crate::models::auth::requests::AuthenticationRequest;
use crate::models::auth::responses::{LoginResponse, TokenClaims};
use crate::services::errors::auth_service_errors::AuthServiceError;
use crate::services::user_service::UserService;

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Issues and verifies the bearer tokens handed out on login.
pub struct AuthService {
    user_service: Arc<UserService>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(user_service: Arc<UserService>, jwt_secret: String, token_ttl: Duration) -> Self {
        AuthService {
            user_service,
            jwt_secret,
            token_ttl,
        }
    }

    pub fn with_jwt_secret(user_service: Arc<UserService>, jwt_secret: String) -> Self {
        Self::new(
            user_service,
            jwt_secret,
            Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        )
    }

    pub async fn login(
        &self,
        request: &AuthenticationRequest,
    ) -> Result<LoginResponse, AuthServiceError> {
        let user = self.user_service.authenticate(request).await?;
        self.generate_token(&user.id)
    }

    pub fn generate_token(&self, user_id: &str) -> Result<LoginResponse, AuthServiceError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.token_ttl).ok_or_else(|| {
            AuthServiceError::JwtError("token lifetime overflows the clock".to_string())
        })?;
        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| AuthServiceError::JwtError(e.to_string()))?;
        debug!(user_id = %user_id, "Issued access token");

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_ttl.num_seconds(),
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());

        match decode::<TokenClaims>(token, &decoding_key, &Validation::default()) {
            Ok(token_data) => {
                let now = Utc::now().timestamp() as usize;
                if token_data.claims.exp < now {
                    Err(AuthServiceError::ExpiredToken)
                } else {
                    Ok(token_data.claims)
                }
            }
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Err(AuthServiceError::ExpiredToken)
                }
                _ => Err(AuthServiceError::InvalidToken),
            },
        }
    }

    pub fn extract_user_id_from_token(&self, token: &str) -> Result<String, AuthServiceError> {
        let claims = self.verify_token(token)?;
        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;
    use crate::repositories::user_repository::MockUserRepository;
    use crate::services::errors::user_service_errors::UserServiceError;

    const TEST_EMAIL: &str = "Ivan@gmail.com";
    const TEST_PASSWORD: &str = "12345678";

    fn stored_user() -> User {
        User::new(
            TEST_EMAIL.to_string(),
            TEST_PASSWORD.to_string(),
            "Ivan".to_string(),
            "Ivanov".to_string(),
        )
    }

    fn auth_service(secret: &str) -> AuthService {
        let user = stored_user();
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(move |email| {
            if email == TEST_EMAIL {
                Ok(Some(user.clone()))
            } else {
                Ok(None)
            }
        });
        AuthService::with_jwt_secret(
            Arc::new(UserService::new(Arc::new(mock_repo))),
            secret.to_string(),
        )
    }

    #[tokio::test]
    async fn test_login_issues_token_for_user() {
        let service = auth_service("test-secret-key");
        let request = AuthenticationRequest {
            email: TEST_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
        };

        let response = service.login(&request).await.unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, DEFAULT_TOKEN_TTL_HOURS * 60 * 60);
        let user_id = service.extract_user_id_from_token(&response.token).unwrap();
        assert!(!user_id.is_empty());
    }

    #[tokio::test]
    async fn test_login_keeps_failure_kinds_distinct() {
        let service = auth_service("test-secret-key");

        let unknown = service
            .login(&AuthenticationRequest {
                email: "Oleg@gmail.com".to_string(),
                password: TEST_PASSWORD.to_string(),
            })
            .await;
        assert!(matches!(
            unknown,
            Err(AuthServiceError::UserServiceError(UserServiceError::UserNotFound))
        ));

        let wrong = service
            .login(&AuthenticationRequest {
                email: TEST_EMAIL.to_string(),
                password: "123".to_string(),
            })
            .await;
        assert!(matches!(
            wrong,
            Err(AuthServiceError::UserServiceError(UserServiceError::WrongPassword))
        ));
    }

    #[test]
    fn test_token_generation_and_verification_roundtrip() {
        let service = auth_service("test-secret-key");

        let login_response = service.generate_token("roundtrip-user-id").unwrap();
        let claims = service.verify_token(&login_response.token).unwrap();

        assert_eq!(claims.sub, "roundtrip-user-id");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_token_invalid() {
        let service = auth_service("test-secret-key");

        let result = service.verify_token("invalid-token");

        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));
    }

    #[test]
    fn test_verify_token_expired() {
        let user_service = Arc::new(UserService::new(Arc::new(MockUserRepository::new())));
        let service = AuthService::new(
            user_service,
            "test-secret-key".to_string(),
            Duration::hours(-2),
        );

        let token = service.generate_token("expired-user").unwrap().token;

        assert!(matches!(
            service.verify_token(&token),
            Err(AuthServiceError::ExpiredToken)
        ));
    }

    #[test]
    fn test_generate_token_with_overflowing_lifetime_is_error() {
        let user_service = Arc::new(UserService::new(Arc::new(MockUserRepository::new())));
        let service = AuthService::new(
            user_service,
            "test-secret-key".to_string(),
            Duration::try_hours(10_000_000_000).unwrap(),
        );

        let result = service.generate_token("u");

        assert!(matches!(result, Err(AuthServiceError::JwtError(_))));
    }

    #[test]
    fn test_different_secrets_produce_different_tokens() {
        let service1 = auth_service("secret1");
        let service2 = auth_service("secret2");

        let token1 = service1.generate_token("same-user-id").unwrap().token;
        let token2 = service2.generate_token("same-user-id").unwrap().token;

        assert_ne!(token1, token2);
        assert!(service1.verify_token(&token1).is_ok());
        assert!(service2.verify_token(&token1).is_err());
        assert!(service2.verify_token(&token2).is_ok());
        assert!(service1.verify_token(&token2).is_err());
    }
}
