use chrono::{DateTime, NaiveDateTime};

use super::models::{CreateStudyRecordRequest, CreateWorkoutRecordRequest};
use crate::common::{check_required_text, validate_date_format, ValidationResult, Validator};

/// Accepts RFC 3339 timestamps and zone-less `YYYY-MM-DDTHH:MM[:SS]` values.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

impl Validator<CreateStudyRecordRequest> for CreateStudyRecordRequest {
    fn validate(&self, data: &CreateStudyRecordRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        check_required_text(&mut result, "subject", &data.subject, 100);

        if data.duration < 0 {
            result.add_error("duration", "Duration must not be negative");
        }

        let start = data.start_time.as_deref().map(|s| (s, parse_timestamp(s)));
        let end = data.end_time.as_deref().map(|s| (s, parse_timestamp(s)));

        if let Some((_, None)) = start {
            result.add_error("startTime", "Start time is not a valid timestamp");
        }
        if let Some((_, None)) = end {
            result.add_error("endTime", "End time is not a valid timestamp");
        }
        if let (Some((_, Some(start))), Some((_, Some(end)))) = (start, end) {
            if end < start {
                result.add_error("endTime", "End time must not be before start time");
            }
        }

        result
    }
}

impl Validator<CreateWorkoutRecordRequest> for CreateWorkoutRecordRequest {
    fn validate(&self, data: &CreateWorkoutRecordRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        check_required_text(&mut result, "workoutType", &data.workout_type, 50);

        if data.duration < 0 {
            result.add_error("duration", "Duration must not be negative");
        }
        if data.calories < 0 {
            result.add_error("calories", "Calories must not be negative");
        }
        if let Err(message) = validate_date_format(&data.workout_date) {
            result.add_error("workoutDate", &message);
        }

        result
    }
}
