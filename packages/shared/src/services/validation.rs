pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Length is counted in characters, not bytes.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Accepts `local@domain` with exactly one `@`, both parts non-empty and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ivan@gmail.com")]
    #[case("a@b")]
    #[case("first.last+tag@mail.example.org")]
    fn test_valid_emails(#[case] email: &str) {
        assert!(is_valid_email(email));
    }

    #[rstest]
    #[case("")]
    #[case("Ivangmail.com")]
    #[case("@gmail.com")]
    #[case("Ivan@")]
    #[case("Ivan@@gmail.com")]
    #[case("Ivan@gmail@com")]
    #[case("Ivan @gmail.com")]
    fn test_invalid_emails(#[case] email: &str) {
        assert!(!is_valid_email(email));
    }

    #[rstest]
    #[case("12345", false)]
    #[case("1234567", false)]
    #[case("12345678", true)]
    #[case("пароль12", true)]
    fn test_password_length(#[case] password: &str, #[case] expected: bool) {
        assert_eq!(is_valid_password(password), expected);
    }

    proptest! {
        #[test]
        fn prop_short_passwords_are_rejected(password in "\\PC{0,7}") {
            prop_assert!(!is_valid_password(&password));
        }

        #[test]
        fn prop_emails_without_at_are_rejected(email in "[^@]*") {
            prop_assert!(!is_valid_email(&email));
        }
    }
}
