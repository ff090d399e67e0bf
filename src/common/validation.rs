// Common validation types and traits

use chrono::NaiveDate;

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Converts the accumulated errors into a `Result` so services can use `?`.
    pub fn into_result(self) -> Result<(), super::ApiError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

/// Checks that a required text field is present and within `max` characters.
pub fn check_required_text(result: &mut ValidationResult, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        result.add_error(field, &format!("{} is required", field));
    } else if value.chars().count() > max {
        result.add_error(field, &format!("{} must not exceed {} characters", field, max));
    }
}

pub fn validate_date_format(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| "Date must be in YYYY-MM-DD format".to_string())
}
