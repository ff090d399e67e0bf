use super::models::ProfileUpdateRequest;
use crate::common::{ValidationResult, Validator};

impl Validator<ProfileUpdateRequest> for ProfileUpdateRequest {
    fn validate(&self, data: &ProfileUpdateRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(nickname) = &data.nickname {
            if nickname.chars().count() > 50 {
                result.add_error("nickname", "Nickname must not exceed 50 characters");
            }
        }

        if let Some(gender) = data.gender.as_deref().filter(|g| !g.trim().is_empty()) {
            if gender != "M" && gender != "F" {
                result.add_error("gender", "Gender must be 'M' or 'F'");
            }
        }

        if let Some(phone) = &data.phone {
            if phone.len() > 20 {
                result.add_error("phone", "Phone number must not exceed 20 characters");
            }
        }

        if let Some(post_code) = &data.post_code {
            if post_code.len() > 10 {
                result.add_error("postCode", "Post code must not exceed 10 characters");
            }
        }

        result
    }
}
