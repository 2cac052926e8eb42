use crate::errors::domain::{DomainError, ValidationKind};

/// Trimmed, non-empty value of `field`.
pub fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation_other(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trimmed, lower-cased email: exactly one `@` with non-empty parts on both sides.
pub fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidEmail,
            "Email address is not valid",
        ))
    }
}

pub fn finite_amount(field: &str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::validation_other(format!(
            "{field} must be a finite number"
        )))
    }
}
