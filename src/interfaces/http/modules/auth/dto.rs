//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::identity::AuthResult;
use crate::domain::user::{CreateUserDto, LoginDto};
use crate::interfaces::http::modules::users::{optional_email, UserDto};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

impl From<LoginRequest> for LoginDto {
    fn from(r: LoginRequest) -> Self {
        Self {
            username: r.username,
            password: r.password,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: UserDto,
}

impl From<AuthResult> for LoginResponse {
    fn from(r: AuthResult) -> Self {
        Self {
            token: r.token,
            token_type: r.token_type,
            expires_in: r.expires_in,
            user: r.user.into(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_register"))]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: String,
    pub email: Option<String>,
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 50, message = "nickname must be at most 50 characters"))]
    pub nickname: Option<String>,
    #[validate(length(max = 255, message = "avatar must be at most 255 characters"))]
    pub avatar: Option<String>,
}

fn validate_register(req: &RegisterRequest) -> Result<(), ValidationError> {
    optional_email(&req.email)
}

impl From<RegisterRequest> for CreateUserDto {
    fn from(r: RegisterRequest) -> Self {
        Self {
            username: r.username,
            password: r.password,
            email: r.email,
            phone: r.phone,
            nickname: r.nickname,
            avatar: r.avatar,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}
