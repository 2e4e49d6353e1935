pub mod auth;
pub mod health;
pub mod metrics;
pub mod power_supplies;
pub mod request_id;
pub mod users;
