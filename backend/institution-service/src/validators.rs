use once_cell::sync::Lazy;
use regex::Regex;

/// Input validation utilities for the institution service

// Compiled once at startup; the pattern is a compile-time constant in practice.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Password strength policy applied at signup.
///
/// The deployment configures the minimum length; the character-class rules
/// mirror what the platform has always required: at least one uppercase
/// letter, one lowercase letter, one digit, and one symbol.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    pub fn is_strong(&self, password: &str) -> bool {
        if password.len() < self.min_length {
            return false;
        }

        let has_uppercase = password.chars().any(|c| c.is_uppercase());
        let has_lowercase = password.chars().any(|c| c.is_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password.chars().any(|c| !c.is_alphanumeric());

        has_uppercase && has_lowercase && has_digit && has_special
    }
}
