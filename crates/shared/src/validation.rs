use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use validator::ValidationError;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

// The regex crate has no look-around, so each character class gets its own check.
static RE_PASSWORD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S{8,}$").expect("password shape regex"));
static RE_PASSWORD_CLASSES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [r"[0-9]", r"[a-z]", r"[A-Z]", r"[@#$%^&+=!]"]
        .map(|re| Regex::new(re).expect("password class regex"))
});

pub fn is_valid_email(value: &str) -> bool {
    RE_EMAIL.is_match(value)
}

/// At least 8 characters without whitespace, with an upper-case letter, a
/// lower-case letter, a digit and one of `@#$%^&+=!`.
pub fn is_valid_password(value: &str) -> bool {
    RE_PASSWORD_SHAPE.is_match(value) && RE_PASSWORD_CLASSES.iter().all(|re| re.is_match(value))
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !is_valid_email(value) {
        return Err(ValidationError::new("email").with_message(Cow::from("Invalid email format")));
    }

    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if !is_valid_password(value) {
        return Err(ValidationError::new("password").with_message(Cow::from(
            "Password must have at least 8 characters, an upper-case letter, a lower-case letter, a digit and a symbol",
        )));
    }

    Ok(())
}
