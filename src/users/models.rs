use serde::Deserialize;

use crate::auth::store::ProfileChanges;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub nickname: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub post_code: Option<String>,
    pub profile_image: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<ProfileUpdateRequest> for ProfileChanges {
    /// Blank fields are treated as absent and leave the stored value alone.
    fn from(request: ProfileUpdateRequest) -> Self {
        Self {
            nickname: present(request.nickname),
            gender: present(request.gender),
            phone: present(request.phone),
            address: present(request.address),
            address_detail: present(request.address_detail),
            post_code: present(request.post_code),
            profile_image: present(request.profile_image),
        }
    }
}
