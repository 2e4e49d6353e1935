//! Application layer: use-case services over the domain repository traits.

pub mod catalog;
pub mod identity;

pub use catalog::PowerSupplyService;
pub use identity::{AuthResult, UserService};
