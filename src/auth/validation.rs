use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use signup_audit_api::SignupRequest;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_AGE: i32 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields required.")]
    MissingFields,
    #[error("Password too short.")]
    PasswordTooShort,
    #[error("Invalid email.")]
    InvalidEmail,
    #[error("Invalid birthday.")]
    InvalidBirthday,
    #[error("Must be 13+.")]
    Underage,
}

/// Signup fields that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub email: String,
    pub full_name: String,
    pub username: String,
    pub password: String,
    pub birthday: String,
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");
    }
    EMAIL_RE.is_match(email)
}

/// Validates a signup against today's local date.
pub fn validate_signup(request: &SignupRequest) -> Result<ValidSignup, ValidationError> {
    validate_signup_with(request, calculate_age)
}

/// Checks run in a fixed order and the first failure is reported:
/// presence, password length, email shape, birthday, minimum age.
fn validate_signup_with(
    request: &SignupRequest,
    age_of: impl Fn(&str) -> Result<i32, ValidationError>,
) -> Result<ValidSignup, ValidationError> {
    let (Some(email), Some(full_name), Some(username), Some(password), Some(birthday)) = (
        present(request.email.as_ref()),
        present(request.full_name.as_ref()),
        present(request.username.as_ref()),
        present(request.password.as_ref()),
        present(request.birthday.as_ref()),
    ) else {
        return Err(ValidationError::MissingFields);
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if age_of(birthday)? < MIN_AGE {
        return Err(ValidationError::Underage);
    }

    Ok(ValidSignup {
        email: email.to_string(),
        full_name: full_name.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        birthday: birthday.to_string(),
    })
}

/// Whole years between `birthday` and today's local date.
pub fn calculate_age(birthday: &str) -> Result<i32, ValidationError> {
    calculate_age_on(birthday, Local::now().date_naive())
}

pub fn calculate_age_on(birthday: &str, today: NaiveDate) -> Result<i32, ValidationError> {
    let born = parse_birthday(birthday).ok_or(ValidationError::InvalidBirthday)?;
    if born > today {
        return Err(ValidationError::InvalidBirthday);
    }

    let mut age = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    Ok(age)
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and RFC 3339 timestamps.
fn parse_birthday(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}
