use super::models::WorkoutPostRequest;
use crate::common::{check_required_text, ValidationResult, Validator};

impl Validator<WorkoutPostRequest> for WorkoutPostRequest {
    fn validate(&self, data: &WorkoutPostRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        check_required_text(&mut result, "title", &data.title, 100);
        check_required_text(&mut result, "content", &data.content, 5000);

        if let Some(category) = &data.workout_category {
            if category.chars().count() > 50 {
                result.add_error("workoutCategory", "Category must not exceed 50 characters");
            }
        }

        if let Some(url) = &data.image_url {
            if url.chars().count() > 500 {
                result.add_error("imageUrl", "Image URL must not exceed 500 characters");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_validation() {
        let request = WorkoutPostRequest {
            title: "".to_string(),
            content: "Leg day".to_string(),
            workout_category: Some("x".repeat(51)),
            image_url: None,
        };

        let result = request.validate(&request);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "workoutCategory"]);
    }
}
