use crate::shared::PageInfo;

/// Raw listing request; page values are normalised by the service.
#[derive(Debug, Clone, Default)]
pub struct ListUsersDto {
    pub page: i64,
    pub page_size: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub status: Option<i32>,
}

/// Query options handed from the service to the repository.
///
/// Empty strings mean "no filter"; `status: None` means "any status", which
/// is distinct from filtering on `Some(0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub page: u64,
    pub page_size: u64,
    pub username: String,
    pub email: String,
    pub status: Option<i32>,
}

impl UserQuery {
    pub fn new(dto: ListUsersDto, page: PageInfo) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            username: dto.username.unwrap_or_default(),
            email: dto.email.unwrap_or_default(),
            status: dto.status,
        }
    }

    /// No predicates, first page of the default size.
    pub fn all() -> Self {
        Self::new(ListUsersDto::default(), PageInfo::normalize(0, 0))
    }
}
