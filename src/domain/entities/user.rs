use chrono::{DateTime, Utc};

use crate::domain::entities::id::Id;
use crate::domain::entities::session::UserRef;

#[derive(Debug, Clone)]
pub struct User {
    pub id: Id<User>,
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(display_name: String, email: String, password: String) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            display_name,
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Identity snapshot handed to a session at login.
    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        }
    }
}
