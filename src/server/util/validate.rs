//! Input validation shared by request parameter conversions.
//!
//! Every check returns `AppError::BadRequest` with a message naming the field.

use crate::server::error::AppError;

/// Trims `value` and checks that its length in characters lies in `min..=max`.
pub fn text(field: &str, value: &str, min: usize, max: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();

    if len < min || len > max {
        return Err(AppError::BadRequest(if min > 0 && len == 0 {
            format!("{} is required", field)
        } else {
            format!("{} must be between {} and {} characters", field, min, max)
        }));
    }

    Ok(trimmed.to_string())
}

/// Like [`text`] for optional fields; blank strings become `None`.
pub fn optional_text(
    field: &str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => text(field, &v, 1, max).map(Some),
        _ => Ok(None),
    }
}

/// Validates a name of a genre, tag or category.
pub fn name(value: &str) -> Result<String, AppError> {
    text("name", value, 1, 64)
}

/// Validates and normalizes an email address to lowercase.
pub fn email(value: &str) -> Result<String, AppError> {
    let email = value.trim().to_lowercase();

    let valid = email.len() <= 254
        && !email.chars().any(char::is_whitespace)
        && match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        };

    if !valid {
        return Err(AppError::BadRequest("email is not a valid address".to_string()));
    }

    Ok(email)
}

/// Usernames are 3 to 32 ASCII letters, digits or underscores.
pub fn username(value: &str) -> Result<String, AppError> {
    let username = value.trim();
    let valid = (3..=32).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid {
        return Err(AppError::BadRequest(
            "username must be 3 to 32 letters, digits or underscores".to_string(),
        ));
    }

    Ok(username.to_string())
}

/// Passwords need at least 8 characters and at most 72 bytes, the bcrypt input limit.
pub fn password(value: &str) -> Result<(), AppError> {
    if value.chars().count() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if value.len() > 72 {
        return Err(AppError::BadRequest(
            "password must be at most 72 bytes".to_string(),
        ));
    }

    Ok(())
}

/// Validates an image or cover URL.
pub fn url(field: &str, value: &str) -> Result<String, AppError> {
    let url = text(field, value, 1, 2048)?;
    if !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/')) {
        return Err(AppError::BadRequest(format!(
            "{} must be an http(s) URL or an absolute path",
            field
        )));
    }

    Ok(url)
}
