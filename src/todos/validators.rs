use super::models::CreateTodoRequest;
use crate::common::{check_required_text, ValidationResult, Validator};

pub const MAX_TODO_LENGTH: usize = 500;

impl Validator<CreateTodoRequest> for CreateTodoRequest {
    fn validate(&self, data: &CreateTodoRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        check_required_text(&mut result, "content", &data.content, MAX_TODO_LENGTH);
        result
    }
}
