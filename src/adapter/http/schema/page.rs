use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::entities::session::UserRef;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

impl From<UserRef> for UserResponse {
    fn from(user: UserRef) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
        }
    }
}

/// What a page template is rendered with: the template name and the
/// logged-in user, `null` for anonymous visitors.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse {
    #[schema(example = "users/dashboard")]
    pub view: String,
    pub user: Option<UserResponse>,
}

impl PageResponse {
    pub fn new(view: &str, user: Option<UserRef>) -> Self {
        Self {
            view: view.to_string(),
            user: user.map(UserResponse::from),
        }
    }
}
