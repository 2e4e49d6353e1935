use async_trait::async_trait;

use super::{NewPowerSupply, PowerSupply, PowerSupplyChanges, PowerSupplyQuery};
use crate::shared::AppResult;

#[async_trait]
pub trait PowerSupplyReader: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<PowerSupply>;
    async fn list(&self, query: &PowerSupplyQuery) -> AppResult<Vec<PowerSupply>>;
    async fn count(&self, query: &PowerSupplyQuery) -> AppResult<u64>;
}

#[async_trait]
pub trait PowerSupplyWriter: Send + Sync {
    async fn create(&self, item: NewPowerSupply) -> AppResult<PowerSupply>;
    async fn update(&self, item: &PowerSupply, changes: &PowerSupplyChanges) -> AppResult<()>;
    async fn update_by_id(&self, id: i64, changes: &PowerSupplyChanges) -> AppResult<()>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub trait PowerSupplyRepository: PowerSupplyReader + PowerSupplyWriter {}

impl<T: PowerSupplyReader + PowerSupplyWriter + ?Sized> PowerSupplyRepository for T {}
