#[derive(Debug)]
pub struct CreateUserDTO {
    pub display_name: String,
    pub email: String,
    pub password: String,
}
