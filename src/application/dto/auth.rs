#[derive(Debug)]
pub struct LoginDTO {
    pub email: String,
    pub password: String,
}
