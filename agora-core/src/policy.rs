//! Password strength rules applied at signup and on every reset.

use crate::error::PolicyError;
use serde::{Deserialize, Serialize};

/// Configurable password policy.
///
/// The defaults require at least 8 characters with a lowercase letter, an
/// uppercase letter, a digit and one of `@$!%*?&`. Characters outside these
/// classes are allowed and simply don't count toward any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
    pub special_characters: String,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_lowercase: true,
            require_uppercase: true,
            require_digit: true,
            require_special: true,
            special_characters: "@$!%*?&".to_string(),
        }
    }
}

impl PasswordPolicy {
    /// Checks a candidate password.
    ///
    /// Length is counted in characters and checked first; a short password
    /// is rejected before the character classes are looked at.
    pub fn validate(&self, password: &str) -> Result<(), PolicyError> {
        if password.chars().count() < self.min_length {
            return Err(PolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password
            .chars()
            .any(|c| self.special_characters.contains(c));

        let mut missing = Vec::new();
        if self.require_uppercase && !has_upper {
            missing.push("an uppercase letter");
        }
        if self.require_lowercase && !has_lower {
            missing.push("a lowercase letter");
        }
        if self.require_digit && !has_digit {
            missing.push("a number");
        }
        if self.require_special && !has_special {
            missing.push("a special character");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PolicyError::MissingClasses { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_strong_password() {
        let policy = PasswordPolicy::default();
        assert!(policy.validate("Sunrise9!").is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let policy = PasswordPolicy::default();
        assert_eq!(
            policy.validate("Ab1!"),
            Err(PolicyError::TooShort { min_length: 8 })
        );
    }

    #[test]
    fn test_missing_classes_listed() {
        let policy = PasswordPolicy::default();
        match policy.validate("alllowercase") {
            Err(PolicyError::MissingClasses { missing }) => {
                assert_eq!(
                    missing,
                    vec!["an uppercase letter", "a number", "a special character"]
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_other_symbols_do_not_count_as_special() {
        let policy = PasswordPolicy::default();
        assert!(policy.validate("Password1#").is_err());
        assert!(policy.validate("Password1&").is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        let policy = PasswordPolicy::default();
        // 8 characters, 12 bytes
        assert!(policy.validate("Ab1!éééé").is_ok());
        // 7 characters, 9 bytes
        assert_eq!(
            policy.validate("Ab1!ééa"),
            Err(PolicyError::TooShort { min_length: 8 })
        );
    }

    #[test]
    fn test_relaxed_policy() {
        let policy = PasswordPolicy {
            min_length: 4,
            require_uppercase: false,
            require_special: false,
            ..PasswordPolicy::default()
        };
        assert!(policy.validate("abc1").is_ok());
    }
}
