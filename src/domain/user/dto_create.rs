/// Input of `UserService::create`; the password is plaintext here and is
/// hashed before it reaches the repository.
#[derive(Debug, Clone, Default)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
}
