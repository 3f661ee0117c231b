//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a guessed author holds at least one visible character.
pub fn validate_author(author: &str) -> Result<(), ValidationError> {
    if author.trim().is_empty() {
        let mut err = ValidationError::new("empty_author");
        err.message = Some("author must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Builds the error reported when the same quote is answered twice.
pub fn duplicate_quote_id(id: i64) -> ValidationError {
    let mut err = ValidationError::new("duplicate_quote_id");
    err.message = Some(format!("quote {id} is answered more than once").into());
    err
}
