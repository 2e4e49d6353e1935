//! User management service — application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::user::{
    CreateUserDto, ListUsersDto, LoginDto, NewUser, UpdateUserDto, User, UserChanges, UserQuery,
    UserRepository, STATUS_ENABLED,
};
use crate::infrastructure::crypto::{verify_password, JwtManager, PasswordHasher};
use crate::shared::{AppError, AppResult, PageInfo, PaginatedResult};

/// Shared by both login failure paths so the response never reveals which
/// half of the credential was wrong.
const BAD_CREDENTIALS: &str = "username or password incorrect";

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// User service — orchestrates all identity / user-management use-cases.
///
/// Generic over `R: UserRepository` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    hasher: PasswordHasher,
    jwt: JwtManager,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>, hasher: PasswordHasher, jwt: JwtManager) -> Self {
        Self { repo, hasher, jwt }
    }

    // ── Registration ────────────────────────────────────────────

    /// Registers a new enabled user.
    ///
    /// The username pre-check gives a friendly error in the common case; a
    /// concurrent duplicate is still stopped by the unique index.
    pub async fn create(&self, dto: CreateUserDto) -> AppResult<User> {
        match self.repo.find_by_username(&dto.username).await {
            Ok(_) => return Err(AppError::already_exists("username")),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        let password_hash = self.hasher.hash(&dto.password)?;

        let user = self
            .repo
            .create(NewUser {
                username: dto.username,
                password_hash,
                email: dto.email.filter(|e| !e.is_empty()),
                phone: dto.phone.unwrap_or_default(),
                nickname: dto.nickname.unwrap_or_default(),
                avatar: dto.avatar.unwrap_or_default(),
                status: STATUS_ENABLED,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.repo.find_by_username(username).await
    }

    /// Counts first; a failed count skips the listing.
    pub async fn list(&self, dto: ListUsersDto) -> AppResult<PaginatedResult<User>> {
        let page = PageInfo::normalize(dto.page, dto.page_size);
        let query = UserQuery::new(dto, page);

        let total = self.repo.count(&query).await?;
        let items = self.repo.list(&query).await?;

        Ok(PaginatedResult::new(items, total, page))
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Sparse patch. An empty patch returns the stored row without writing;
    /// otherwise the row is re-read so server-side timestamps are current.
    pub async fn update(&self, id: i64, dto: UpdateUserDto) -> AppResult<User> {
        let user = self.repo.find_by_id(id).await?;

        let changes = UserChanges::from(dto);
        if changes.is_empty() {
            debug!(user_id = id, "Empty user patch, nothing to write");
            return Ok(user);
        }

        self.repo.update(&user, &changes).await?;
        info!(user_id = id, "User updated");
        self.repo.find_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    // ── Authentication ──────────────────────────────────────────

    /// Checks credentials first and account status second, so a disabled
    /// account is only revealed to someone who knows its password.
    pub async fn login(&self, dto: LoginDto) -> AppResult<User> {
        let user = match self.repo.find_by_username(&dto.username).await {
            Ok(user) => user,
            Err(e) if e.is_not_found() => return Err(AppError::unauthorized(BAD_CREDENTIALS)),
            Err(e) => return Err(e),
        };

        if !Self::verify_password(&user.password_hash, &dto.password) {
            warn!(username = %dto.username, "Failed login attempt");
            return Err(AppError::unauthorized(BAD_CREDENTIALS));
        }

        if !user.is_enabled() {
            return Err(AppError::forbidden("account disabled"));
        }

        Ok(user)
    }

    /// `login` plus a freshly issued bearer token.
    pub async fn authenticate(&self, dto: LoginDto) -> AppResult<AuthResult> {
        let user = self.login(dto).await?;
        let token = self.jwt.issue_token(user.id, &user.username)?;
        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt.expires_in(),
            user,
        })
    }

    pub fn refresh_token(&self, token: &str) -> AppResult<String> {
        Ok(self.jwt.refresh_token(token)?)
    }

    /// Lifetime of issued tokens, in seconds.
    pub fn token_expires_in(&self) -> i64 {
        self.jwt.expires_in()
    }

    pub fn verify_password(hash: &str, password: &str) -> bool {
        verify_password(hash, password)
    }
}

// ── Tests ──────────────────────────────────────────────────────
