use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const STATUS_LISTED: i32 = 1;
pub const STATUS_UNLISTED: i32 = 0;

/// Catalog entry for a power-supply unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerSupply {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: String,
    /// Rated output in watts.
    pub power: i32,
    /// Certification label, e.g. `80+ Gold`.
    pub efficiency: String,
    pub modular: bool,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PowerSupply {
    pub fn is_listed(&self) -> bool {
        self.status == STATUS_LISTED
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPowerSupply {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub power: i32,
    pub efficiency: String,
    pub modular: bool,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    pub status: i32,
}
