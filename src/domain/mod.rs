//! Domain layer: entity value types, service DTOs and repository traits.

pub mod power_supply;
pub mod user;

pub use power_supply::PowerSupply;
pub use user::User;

/// Anything addressed by a numeric primary key.
pub trait Identifiable {
    fn id(&self) -> i64;
}

impl Identifiable for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identifiable for PowerSupply {
    fn id(&self) -> i64 {
        self.id
    }
}
