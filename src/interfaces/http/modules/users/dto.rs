//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::domain::user::{ListUsersDto, UpdateUserDto, User};

/// User API representation. The password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub phone: String,
    pub nickname: String,
    pub avatar: String,
    /// 1 = enabled, 0 = disabled
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            phone: u.phone,
            nickname: u.nickname,
            avatar: u.avatar,
            status: u.status,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Empty strings count as "not supplied" and skip the format check.
pub(crate) fn optional_email(email: &Option<String>) -> Result<(), ValidationError> {
    match email {
        Some(e) if !e.is_empty() && !e.validate_email() => {
            let mut err = ValidationError::new("email");
            err.message = Some("email: invalid email format".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Sparse update; omitted or empty fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_user"))]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 50, message = "nickname must be at most 50 characters"))]
    pub nickname: Option<String>,
    #[validate(length(max = 255, message = "avatar must be at most 255 characters"))]
    pub avatar: Option<String>,
    #[validate(range(min = 0, max = 1, message = "status must be 0 or 1"))]
    pub status: Option<i32>,
}

fn validate_update_user(req: &UpdateUserRequest) -> Result<(), ValidationError> {
    optional_email(&req.email)
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            email: r.email,
            phone: r.phone,
            nickname: r.nickname,
            avatar: r.avatar,
            status: r.status,
        }
    }
}

/// List users query parameters
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
pub struct ListUsersParams {
    /// Page number (1-based). Default: 1
    pub page: Option<i64>,
    /// Items per page (1–100). Default: 10
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: Option<i64>,
    /// Substring match on username
    pub username: Option<String>,
    /// Substring match on email
    pub email: Option<String>,
    /// Exact status (0 or 1)
    pub status: Option<i32>,
}

impl From<ListUsersParams> for ListUsersDto {
    fn from(p: ListUsersParams) -> Self {
        Self {
            page: p.page.unwrap_or_default(),
            page_size: p.page_size.unwrap_or_default(),
            username: p.username,
            email: p.email,
            status: p.status,
        }
    }
}
