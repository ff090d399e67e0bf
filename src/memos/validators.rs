use super::models::MemoRequest;
use crate::common::{check_required_text, ValidationResult, Validator};

impl Validator<MemoRequest> for MemoRequest {
    fn validate(&self, data: &MemoRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        check_required_text(&mut result, "title", &data.title, 100);
        check_required_text(&mut result, "content", &data.content, 2000);

        if let Some(category) = &data.category {
            if category.chars().count() > 50 {
                result.add_error("category", "Category must not exceed 50 characters");
            }
        }

        result
    }
}
