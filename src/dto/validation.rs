//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a user-supplied name contains at least one
/// non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("value must not be blank".into());
        return Err(err);
    }

    Ok(())
}
