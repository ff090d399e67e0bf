use regex::Regex;
use std::sync::LazyLock;

use super::models::{LoginRequest, SignupRequest};
use crate::common::{check_required_text, ValidationResult, Validator};

pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 255 && EMAIL_PATTERN.is_match(email)
}

impl Validator<SignupRequest> for SignupRequest {
    fn validate(&self, data: &SignupRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !is_valid_email(data.email.trim()) {
            result.add_error("email", "A valid email address is required");
        }

        if data.password.chars().count() < MIN_PASSWORD_LENGTH {
            result.add_error(
                "password",
                &format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            );
        }

        check_required_text(&mut result, "nickname", &data.nickname, 50);

        if let Some(gender) = data.gender.as_deref().filter(|g| !g.is_empty()) {
            if gender != "M" && gender != "F" {
                result.add_error("gender", "Gender must be 'M' or 'F'");
            }
        }

        result
    }
}

impl Validator<LoginRequest> for LoginRequest {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        }
        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        }

        result
    }
}
