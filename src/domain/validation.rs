//! Input validation helpers shared by the API boundary and domain services.

use crate::errors::{AppError, AppResult};

/// Confirmation check used by the password reset and change flows.
pub fn ensure_passwords_match(password: &str, confirm: &str) -> AppResult<()> {
    if password != confirm {
        return Err(AppError::validation("Passwords do not match"));
    }
    Ok(())
}

/// Format validation errors into a user-friendly string
pub fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
