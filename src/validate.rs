//! Canonical client-side validation rules.
//!
//! These run before any request is made. The backend stays the authority;
//! this only keeps obviously malformed input off the network.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Upper bound for student photos.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 64;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z .'\-]{0,49}$").expect("valid regex"));
static ROLL_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9/_\-]{0,19}$").expect("valid regex"));
static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 &.()\-]{0,49}$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Enter a valid email address (name@domain.tld)")]
    Email,
    #[error("Password must be 8-64 characters with no spaces")]
    Password,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Name: letters, spaces, apostrophes, dots and hyphens only (max 50)")]
    Name,
    #[error("Roll number: letters, digits, '/', '_' or '-' only (max 20)")]
    RollNo,
    #[error("{0}: letters, digits, spaces and & . ( ) - only (max 50)")]
    Label(&'static str),
    #[error("Photo must be an image")]
    PhotoType,
    #[error("Photo must be at most 5 MB")]
    PhotoSize,
    #[error("Photo is empty")]
    PhotoEmpty,
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(value)
    }
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    let value = required("Email", value)?;
    if value.len() <= 254 && EMAIL.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Email)
    }
}

/// Password policy for new accounts.
pub fn new_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Missing("Password"));
    }
    let len = value.chars().count();
    if (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len)
        && !value.chars().any(char::is_whitespace)
    {
        Ok(())
    } else {
        Err(ValidationError::Password)
    }
}

/// Login only checks presence; accounts predating the policy must still sign in.
pub fn login_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Missing("Password"))
    } else {
        Ok(())
    }
}

pub fn password_confirmation(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password == confirm {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

pub fn name(value: &str) -> Result<(), ValidationError> {
    let value = required("Name", value)?;
    if NAME.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Name)
    }
}

pub fn roll_no(value: &str) -> Result<(), ValidationError> {
    let value = required("Roll number", value)?;
    if ROLL_NO.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::RollNo)
    }
}

/// Course and branch share one rule.
pub fn label(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let value = required(field, value)?;
    if LABEL.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Label(field))
    }
}

pub fn photo(content_type: &str, len: usize) -> Result<(), ValidationError> {
    if !content_type.starts_with("image/") {
        return Err(ValidationError::PhotoType);
    }
    match len {
        0 => Err(ValidationError::PhotoEmpty),
        n if n > MAX_PHOTO_BYTES => Err(ValidationError::PhotoSize),
        _ => Ok(()),
    }
}
