//! Input validation for registration and login

/// Normalize an email for storage and lookup: trimmed, lowercased.
///
/// Lookups and the unique constraint both operate on this form, so
/// `Ann@X.com` and `ann@x.com` are the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > 128 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate password shape
///
/// Only a sanity cap on length. Strength policy is delegated upstream; the
/// hasher accepts arbitrary input.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() > 1024 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ann@X.COM "), "ann@x.com");
        assert_eq!(normalize_email("ann@x.com"), "ann@x.com");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ann@x.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("two words@x.com").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ann").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1").is_ok());
        // No minimum: policy lives outside this core
        assert!(validate_password("a").is_ok());
        assert!(validate_password("").is_ok());
        assert!(validate_password(&"p".repeat(2000)).is_err());
    }
}
