pub mod current_user;
pub mod entities;
pub mod gate;
