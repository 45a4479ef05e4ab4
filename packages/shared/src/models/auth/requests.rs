use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthenticationRequest {
    pub email: String,
    pub password: String,
}

/// Partial profile update. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub favorite_movie: Option<String>,
    #[serde(default)]
    pub favorite_book: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FindByEmailQuery {
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_request_from_json() {
        let json = r#"{
            "first_name": "Ivan",
            "last_name": "Ivanov",
            "password": "12345678",
            "email": "Ivan@gmail.com"
        }"#;

        let request: RegistrationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.first_name, "Ivan");
        assert_eq!(request.last_name, "Ivanov");
        assert_eq!(request.password, "12345678");
        assert_eq!(request.email, "Ivan@gmail.com");
    }

    #[test]
    fn test_authentication_request_requires_both_fields() {
        let result: Result<AuthenticationRequest, _> =
            serde_json::from_str(r#"{"email": "Ivan@gmail.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_update_fields_default_to_none() {
        let update: ProfileUpdateRequest =
            serde_json::from_str(r#"{"favorite_book": "Master and Margarita"}"#).unwrap();

        assert!(update.first_name.is_none());
        assert!(update.last_name.is_none());
        assert!(update.photo.is_none());
        assert!(update.favorite_movie.is_none());
        assert_eq!(update.favorite_book.as_deref(), Some("Master and Margarita"));
    }
}
