// ============================
// crates/backend-lib/src/validation.rs
// ============================
//! Form validation for the signup and login pages.

use thiserror::Error;

/// Minimum signup password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Possible form validation errors. The messages are shown inline under
/// the form as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill all fields.")]
    MissingFields,

    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate the signup form. Checks run in a fixed order and the first
/// failure wins: required fields, password length, confirmation.
///
/// Username and email are required after trimming; the password is taken
/// verbatim. Length is counted in UTF-16 code units, so a character
/// outside the Basic Multilingual Plane counts as two.
pub fn validate_signup(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    min_password_length: usize,
) -> ValidationResult<()> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if password.encode_utf16().count() < min_password_length {
        return Err(ValidationError::PasswordTooShort {
            min: min_password_length,
        });
    }

    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

/// Validate the login form, returning the trimmed email
pub fn validate_login<'a>(email: &'a str, password: &str) -> ValidationResult<&'a str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, email: &str, password: &str, confirm: &str) -> ValidationResult<()> {
        validate_signup(username, email, password, confirm, MIN_PASSWORD_LENGTH)
    }

    #[test]
    fn test_missing_fields_checked_first() {
        assert_eq!(signup("", "a@b.c", "123", "456"), Err(ValidationError::MissingFields));
        assert_eq!(signup("rider", "   ", "secret1", "secret1"), Err(ValidationError::MissingFields));
        assert_eq!(signup("rider", "a@b.c", "", ""), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_confirmation_is_not_a_required_field() {
        // an empty confirmation is a mismatch, not a missing field
        assert_eq!(
            signup("rider", "a@b.c", "secret1", ""),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_password_length_boundary() {
        assert_eq!(
            signup("rider", "a@b.c", "12345", "12345"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
        assert_eq!(signup("rider", "a@b.c", "123456", "123456"), Ok(()));
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // five BMP characters are five units, whatever their UTF-8 width
        assert_eq!(signup("rider", "a@b.c", "ééééé", "ééééé"), Err(ValidationError::PasswordTooShort { min: 6 }));
        // each emoji is a surrogate pair
        assert_eq!(signup("rider", "a@b.c", "😀😀😀", "😀😀😀"), Ok(()));
        assert_eq!(signup("rider", "a@b.c", "😀😀", "😀😀"), Err(ValidationError::PasswordTooShort { min: 6 }));
    }

    #[test]
    fn test_length_checked_before_mismatch() {
        assert_eq!(
            signup("rider", "a@b.c", "123", "456"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
        assert_eq!(
            signup("rider", "a@b.c", "a-long-password", "another-long-one"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_custom_minimum() {
        assert_eq!(validate_signup("r", "a@b.c", "abcdefgh", "abcdefgh", 10), Err(ValidationError::PasswordTooShort { min: 10 }));
        assert_eq!(
            ValidationError::PasswordTooShort { min: 10 }.to_string(),
            "Password must be at least 10 characters."
        );
    }

    #[test]
    fn test_validate_login() {
        assert_eq!(validate_login("  rider@ride.safe ", "pw"), Ok("rider@ride.safe"));
        assert_eq!(validate_login("", "pw"), Err(ValidationError::MissingFields));
        assert_eq!(validate_login("   ", "pw"), Err(ValidationError::MissingFields));
        assert_eq!(validate_login("rider@ride.safe", ""), Err(ValidationError::MissingFields));
    }
}
