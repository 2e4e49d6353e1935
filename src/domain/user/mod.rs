//! User aggregate
//!
//! Contains the User entity, service DTOs, query options and the repository
//! capability traits.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_list;
mod dto_login;
mod dto_update;

pub use model::{NewUser, User, STATUS_DISABLED, STATUS_ENABLED};

pub use dto_create::CreateUserDto;
pub use dto_list::{ListUsersDto, UserQuery};
pub use dto_login::LoginDto;
pub use dto_update::{UpdateUserDto, UserChanges};

pub use repository::{UserReader, UserRepository, UserWriter};
