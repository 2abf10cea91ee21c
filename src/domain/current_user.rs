use crate::domain::entities::session::{Session, UserRef};

/// The `user` value pages render with. `None` stands for an anonymous visitor.
pub fn project_current_user(session: Option<&Session>) -> Option<UserRef> {
    session.and_then(|session| session.user.clone())
}
