pub mod id;
pub mod session;
pub mod user;
