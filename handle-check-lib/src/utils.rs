//! Utility functions for username validation.

use crate::error::HandleCheckError;

/// Minimum accepted username length.
pub const MIN_USERNAME_LEN: usize = 3;

/// Maximum accepted username length.
pub const MAX_USERNAME_LEN: usize = 30;

/// Validate a username before probing.
///
/// Accepts 3-30 characters from `[A-Za-z0-9_.-]`. This is deliberately
/// the intersection of what the probed platforms accept; a username that
/// passes here can be substituted into any registry URL template without
/// further encoding.
///
/// # Returns
///
/// `Ok(())` if valid, `Err(HandleCheckError::InvalidUsername)` otherwise.
pub fn validate_username(username: &str) -> Result<(), HandleCheckError> {
    let username = username.trim();

    if username.is_empty() {
        return Err(HandleCheckError::invalid_username(
            username,
            "username cannot be empty",
        ));
    }

    if username.len() < MIN_USERNAME_LEN {
        return Err(HandleCheckError::invalid_username(
            username,
            format!("username must be at least {} characters", MIN_USERNAME_LEN),
        ));
    }

    if username.len() > MAX_USERNAME_LEN {
        return Err(HandleCheckError::invalid_username(
            username,
            format!("username must be at most {} characters", MAX_USERNAME_LEN),
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
    {
        return Err(HandleCheckError::invalid_username(
            username,
            "username may only contain letters, digits, '_', '.' and '-'",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("octocat").is_ok());
        assert!(validate_username("user_name").is_ok());
        assert!(validate_username("user.name-99").is_ok());
        assert!(validate_username("abc").is_ok()); // minimum length
        assert!(validate_username(&"a".repeat(30)).is_ok()); // maximum length
    }

    #[test]
    fn test_empty_username() {
        let err = validate_username("").unwrap_err();
        assert!(err.to_string().contains("empty"));
        // Whitespace-only trims down to empty
        assert!(validate_username("   ").is_err());
    }

    #[test]
    fn test_length_bounds() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(31)).is_err());
    }

    #[test]
    fn test_invalid_characters() {
        assert!(validate_username("user name").is_err());
        assert!(validate_username("user/name").is_err());
        assert!(validate_username("user@host").is_err());
        assert!(validate_username("naïve").is_err());
    }
}
