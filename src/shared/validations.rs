use super::errors::{DomainError, DomainResult};

/// Trim a registration number, rejecting it when nothing is left.
pub fn validate_registration(raw: &str) -> DomainResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidRegistration(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
