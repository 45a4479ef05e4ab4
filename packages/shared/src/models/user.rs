use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub favorite_movie: Option<String>,
    #[serde(default)]
    pub favorite_book: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password: String, first_name: String, last_name: String) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            email,
            password,
            first_name,
            last_name,
            photo: None,
            favorite_movie: None,
            favorite_book: None,
            created_at: Utc::now(),
        }
    }
}

/// Public view of a [`User`]; never carries the password.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub photo: Option<String>,
    pub favorite_movie: Option<String>,
    pub favorite_book: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            photo: user.photo,
            favorite_movie: user.favorite_movie,
            favorite_book: user.favorite_book,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User::new(
            "Ivan@gmail.com".to_string(),
            "12345678".to_string(),
            "Ivan".to_string(),
            "Ivanov".to_string(),
        )
    }

    #[test]
    fn test_new_user_has_id_and_empty_profile() {
        let user = create_test_user();

        assert!(Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.email, "Ivan@gmail.com");
        assert_eq!(user.first_name, "Ivan");
        assert_eq!(user.last_name, "Ivanov");
        assert!(user.photo.is_none());
        assert!(user.favorite_movie.is_none());
        assert!(user.favorite_book.is_none());
    }

    #[test]
    fn test_user_id_uniqueness() {
        let user1 = create_test_user();
        let user2 = create_test_user();

        assert_ne!(user1.id, user2.id);
    }

    #[test]
    fn test_user_response_hides_password() {
        let user = create_test_user();
        let response = UserResponse::from(user.clone());

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("12345678"));
        assert_eq!(response.id, user.id);
        assert_eq!(response.email, user.email);
    }

    #[test]
    fn test_user_without_profile_fields_deserializes() {
        let json = r#"{
            "id": "42",
            "email": "Ivan@gmail.com",
            "password": "12345678",
            "first_name": "Ivan",
            "last_name": "Ivanov",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "42");
        assert!(user.photo.is_none());
    }
}
