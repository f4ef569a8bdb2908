//! Signup field rules.

use numo_shared::auth::SignupRequest;
use thiserror::Error;

use super::password::MIN_PASSWORD_LEN;

/// Shortest username accepted at signup.
pub const MIN_USERNAME_LEN: usize = 3;

/// Signup validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignupError {
    /// Name is required.
    #[error("name cannot be empty")]
    EmptyName,

    /// Username too short.
    #[error("username must be at least 3 characters")]
    UsernameTooShort,

    /// Password too short.
    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    /// Email does not look like an address.
    #[error("invalid email address")]
    InvalidEmail,
}

/// Checks a signup request.
///
/// # Errors
///
/// Returns the first `SignupError` found.
pub fn validate_signup(request: &SignupRequest) -> Result<(), SignupError> {
    if request.name.trim().is_empty() {
        return Err(SignupError::EmptyName);
    }
    if request.username.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(SignupError::UsernameTooShort);
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SignupError::PasswordTooShort);
    }
    if let Some(email) = request.email.as_deref().filter(|e| !e.is_empty())
        && !looks_like_email(email)
    {
        return Err(SignupError::InvalidEmail);
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SignupRequest {
        SignupRequest {
            name: "Maria".to_string(),
            email: Some("maria@example.com".to_string()),
            username: "maria".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert_eq!(validate_signup(&request()), Ok(()));
    }

    #[test]
    fn test_email_is_optional() {
        let mut req = request();
        req.email = None;
        assert_eq!(validate_signup(&req), Ok(()));
    }

    #[test]
    fn test_rejects_short_fields() {
        let mut req = request();
        req.username = "ab".to_string();
        assert_eq!(validate_signup(&req), Err(SignupError::UsernameTooShort));

        let mut req = request();
        req.password = "12345".to_string();
        assert_eq!(validate_signup(&req), Err(SignupError::PasswordTooShort));

        let mut req = request();
        req.name = " ".to_string();
        assert_eq!(validate_signup(&req), Err(SignupError::EmptyName));
    }

    #[test]
    fn test_rejects_bad_email() {
        for bad in ["maria", "maria@", "@example.com", "maria@example", "a b@c.d"] {
            let mut req = request();
            req.email = Some(bad.to_string());
            assert_eq!(validate_signup(&req), Err(SignupError::InvalidEmail), "{bad}");
        }
    }
}
