//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use validator::ValidationError;

/// Maximum length of a client name.
pub const MAX_NAME_LENGTH: usize = 200;

lazy_static! {
    /// Normalized phone number: optional leading `+` followed by 7 to 15 digits.
    static ref PHONE_NUMBER_RE: Regex = Regex::new(r"^\+?[0-9]{7,15}$").unwrap();
}

/// Validates that a phone number is in normalized form.
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if PHONE_NUMBER_RE.is_match(phone_number) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must be 7 to 15 digits with an optional leading +".into());
        Err(err)
    }
}

/// Validates that a client name is non-blank and within length bounds.
pub fn validate_client_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("name_length");
        err.message = Some("Name must be between 1 and 200 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a list of phone numbers: every entry must be in normalized
/// form and the list must not contain duplicates.
pub fn validate_phone_numbers(phone_numbers: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for phone_number in phone_numbers {
        validate_phone_number(phone_number)?;
        if !seen.insert(phone_number.as_str()) {
            let mut err = ValidationError::new("phone_duplicate");
            err.message = Some("Phone numbers must be unique".into());
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Phone number tests
    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("+79990000001").is_ok());
        assert!(validate_phone_number("79990000001").is_ok());
        assert!(validate_phone_number("+12222222222").is_ok());
        assert!(validate_phone_number("1234567").is_ok());
    }

    #[test]
    fn test_validate_phone_number_rejects_malformed() {
        assert!(validate_phone_number("").is_err());
        assert!(validate_phone_number("+").is_err());
        assert!(validate_phone_number("123456").is_err()); // too short
        assert!(validate_phone_number("1234567890123456").is_err()); // too long
        assert!(validate_phone_number("+7 999 000 00 01").is_err());
        assert!(validate_phone_number("phone").is_err());
        assert!(validate_phone_number("8-800-555-35-35").is_err());
    }

    #[test]
    fn test_validate_phone_number_error_message() {
        let err = validate_phone_number("not-a-phone").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Phone number must be 7 to 15 digits with an optional leading +"
        );
    }

    // Name tests
    #[test]
    fn test_validate_client_name() {
        assert!(validate_client_name("Ivanov").is_ok());
        assert!(validate_client_name("Rafael Nadal Parera").is_ok());
        assert!(validate_client_name(&"x".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_client_name_counts_characters_not_bytes() {
        // 200 Cyrillic characters are 400 bytes but still within bounds.
        assert!(validate_client_name(&"Ж".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_client_name(&"Ж".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_client_name_rejects_blank_and_oversized() {
        assert!(validate_client_name("").is_err());
        assert!(validate_client_name("   ").is_err());
        assert!(validate_client_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_client_name_error_message() {
        let err = validate_client_name("").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Name must be between 1 and 200 characters"
        );
    }

    // Phone list tests
    #[test]
    fn test_validate_phone_numbers() {
        assert!(validate_phone_numbers(&[]).is_ok());
        assert!(validate_phone_numbers(&["+441111111111".to_string()]).is_ok());
        assert!(validate_phone_numbers(&[
            "+441111111111".to_string(),
            "+442222222222".to_string(),
        ])
        .is_ok());
    }

    #[test]
    fn test_validate_phone_numbers_rejects_duplicates() {
        let err = validate_phone_numbers(&[
            "+441111111111".to_string(),
            "+441111111111".to_string(),
        ])
        .unwrap_err();
        assert_eq!(err.code, "phone_duplicate");
    }

    #[test]
    fn test_validate_phone_numbers_rejects_malformed_entry() {
        let err = validate_phone_numbers(&[
            "+441111111111".to_string(),
            "broken".to_string(),
        ])
        .unwrap_err();
        assert_eq!(err.code, "phone_format");
    }
}
