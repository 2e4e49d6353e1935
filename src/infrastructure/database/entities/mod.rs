//! Database entities module

pub mod power_supply;
pub mod user;

pub use power_supply::Entity as PowerSupply;
pub use user::Entity as User;
