use crate::domain::entities::session::Session;

#[derive(Debug)]
pub struct ResolveSessionDTO {
    /// Raw cookie value, if the client sent one.
    pub session_id: Option<String>,
    pub idle_timeout: i64,
}

#[derive(Debug, Clone)]
pub struct ResolvedSessionDTO {
    pub session: Session,
    /// True when no usable session came with the request and a new one was issued.
    pub is_new: bool,
}
