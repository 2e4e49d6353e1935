#[derive(Debug, Clone)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}
