//! Repository implementations backed by SeaORM

pub mod base_repository;
pub mod power_supply_repository;
pub mod user_repository;

pub use base_repository::{BaseRepository, ConnectionSource, PartialUpdate, RepositoryEntity, TxFuture};
pub use power_supply_repository::SeaOrmPowerSupplyRepository;
pub use user_repository::SeaOrmUserRepository;
