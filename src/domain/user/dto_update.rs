/// Sparse patch as submitted by the caller. Empty strings and `None` mean
/// "leave the stored value alone".
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub status: Option<i32>,
}

/// The fields that will actually be written. Only `Some` entries reach the
/// database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub status: Option<i32>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.nickname.is_none()
            && self.avatar.is_none()
            && self.status.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<UpdateUserDto> for UserChanges {
    fn from(dto: UpdateUserDto) -> Self {
        Self {
            email: non_empty(dto.email),
            phone: non_empty(dto.phone),
            nickname: non_empty(dto.nickname),
            avatar: non_empty(dto.avatar),
            status: dto.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_are_dropped() {
        let changes = UserChanges::from(UpdateUserDto {
            email: Some(String::new()),
            phone: Some(String::new()),
            nickname: None,
            avatar: Some(String::new()),
            status: None,
        });
        assert!(changes.is_empty());
    }

    #[test]
    fn zero_status_is_an_explicit_change() {
        let changes = UserChanges::from(UpdateUserDto {
            status: Some(0),
            nickname: Some("neo".into()),
            ..Default::default()
        });
        assert_eq!(changes.status, Some(0));
        assert_eq!(changes.nickname.as_deref(), Some("neo"));
        assert!(!changes.is_empty());
    }
}
